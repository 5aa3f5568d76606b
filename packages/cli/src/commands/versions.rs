use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagewright_editor::VersionManager;
use pagewright_workspace::MemoryGateway;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct VersionsArgs {
    /// Workspace file holding stored sites and versions
    pub store: PathBuf,

    /// Page whose versions to list
    pub page: String,
}

pub async fn versions(args: VersionsArgs) -> Result<()> {
    if !args.store.exists() {
        anyhow::bail!("Workspace file does not exist: {}", args.store.display());
    }

    let gateway = Arc::new(MemoryGateway::open(&args.store).await?);
    let listed = VersionManager::new(gateway).list(&args.page).await?;

    println!("📚 {} {}", "Versions of".bright_blue().bold(), args.page.bright_white());
    println!();

    if listed.is_empty() {
        println!("   No versions saved yet");
        return Ok(());
    }

    for version in listed {
        println!(
            "   {} {}  {}  {}",
            format!("v{}", version.version_number).green().bold(),
            version.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            version.change_message.as_deref().unwrap_or("-"),
            format!("({} top-level components)", version.components.len()).dimmed()
        );
    }

    Ok(())
}
