use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagewright_editor::{resolve, ComponentNode, Site, WriteTarget};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct OutlineArgs {
    /// Site JSON file
    pub site: PathBuf,

    /// Only show this page
    #[arg(short, long)]
    pub page: Option<String>,

    /// Show the tree a language resolves to
    #[arg(short, long)]
    pub language: Option<String>,
}

pub fn outline(args: OutlineArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.site)
        .with_context(|| format!("Failed to read site {}", args.site.display()))?;
    let site: Site = serde_json::from_str(&content)
        .with_context(|| format!("Invalid site file {}", args.site.display()))?;

    if let Some(page_id) = &args.page {
        if site.page(page_id).is_none() {
            anyhow::bail!("Site {} has no page {}", site.id, page_id);
        }
    }

    println!("{} {}", site.name.bright_white().bold(), format!("/{}", site.slug).dimmed());
    if site.published {
        if let Some(url) = &site.published_url {
            println!("   {} {}", "published".green(), url);
        }
    }
    println!();

    let language = args
        .language
        .as_deref()
        .filter(|code| *code != site.default_language);

    let mut pages: Vec<_> = site
        .pages
        .iter()
        .filter(|p| args.page.as_deref().map_or(true, |id| id == p.id))
        .collect();
    pages.sort_by_key(|p| p.order);

    for page in pages {
        let (tree, target) = resolve(page, language);
        let source = match target {
            WriteTarget::Default if language.is_some() => " (fallback)".to_string(),
            WriteTarget::Default => String::new(),
            WriteTarget::Overlay(code) => format!(" [{}]", code),
        };
        let home = if page.is_home_page { " ⌂" } else { "" };

        println!(
            "{}{}{} {}",
            page.title.bold(),
            home.yellow(),
            source.dimmed(),
            format!("/{} · {}", page.slug, page.id).dimmed()
        );
        print!("{}", render_tree(tree));
        println!();
    }

    Ok(())
}

/// Indented one-line-per-node rendering of a component tree
pub fn render_tree(tree: &[ComponentNode]) -> String {
    let mut out = String::new();
    if tree.is_empty() {
        out.push_str("  (empty)\n");
    }
    for node in tree {
        write_node(&mut out, node, 1);
    }
    out
}

fn write_node(out: &mut String, node: &ComponentNode, depth: usize) {
    let _ = writeln!(out, "{}{} <{}> #{}", "  ".repeat(depth), node.label, node.kind, node.id);
    for child in node.children() {
        write_node(out, child, depth + 1);
    }
}
