use crate::config::{builtin_catalog, DEFAULT_CATALOG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagewright_editor::{
    ComponentNode, EditorConfig, LanguageDescriptor, Page, Site, DEFAULT_CONFIG_NAME,
};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Site name
    #[arg(short, long, default_value = "My Site")]
    pub name: String,

    /// Site file to create
    #[arg(short, long, default_value = "site.json")]
    pub site_file: String,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

fn slugify(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    slug.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn starter_site(name: &str) -> Site {
    let mut home = Page::new("home", "Home", "home");
    home.is_home_page = true;
    home.components = vec![ComponentNode::new("hero-1", "hero", "Hero")];

    let slug = slugify(name);
    Site {
        id: slug.clone(),
        name: name.to_string(),
        slug,
        theme: Default::default(),
        pages: vec![home],
        published: false,
        published_url: None,
        published_at: None,
        default_language: "en".to_string(),
        languages: vec![LanguageDescriptor {
            code: "en".to_string(),
            name: "English".to_string(),
        }],
    }
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let root = PathBuf::from(cwd);
    let site_path = root.join(&args.site_file);

    if site_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            args.site_file.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagewright site...".bright_blue().bold());

    let site = starter_site(&args.name);
    fs::write(&site_path, serde_json::to_string_pretty(&site)?)?;
    println!("  {} Created {}", "✓".green(), args.site_file);

    let config_path = root.join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() || args.force {
        fs::write(&config_path, serde_json::to_string_pretty(&EditorConfig::default())?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    let catalog_path = root.join(DEFAULT_CATALOG_NAME);
    if !catalog_path.exists() || args.force {
        fs::write(&catalog_path, serde_json::to_string_pretty(&builtin_catalog())?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CATALOG_NAME);
    }

    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Write a command script, e.g. [{{ \"op\": \"add\", \"kind\": \"text\" }}]");
    println!("  2. Run: pagewright replay {} script.json", args.site_file);
    println!("  3. Run: pagewright outline {}", args.site_file);

    Ok(())
}
