use crate::config::{load_catalog, load_config};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagewright_editor::{
    EditorCommand, EditorCore, EditorError, Notice, NoticeLevel, Outbox, PersistenceGateway, Site,
    SiteOperations, SyncHandles, SyncWorker, VersionManager,
};
use pagewright_workspace::MemoryGateway;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Site JSON file
    pub site: PathBuf,

    /// JSON array of commands to apply
    pub script: PathBuf,

    /// Where to write the edited site (defaults to overwriting the input)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Workspace file holding stored sites and versions
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Editor config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Component catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// One script entry: an editor command, or an awaited backend action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Editor(EditorCommand),
    Remote(RemoteStep),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RemoteStep {
    SaveVersion {
        #[serde(default)]
        message: Option<String>,
    },
    RestoreVersion {
        version: u32,
    },
    Publish,
    Unpublish,
}

pub fn parse_script(content: &str) -> Result<Vec<Step>> {
    serde_json::from_str(content).context("Invalid command script")
}

struct Replay {
    core: EditorCore,
    gateway: Arc<MemoryGateway>,
    worker: SyncWorker,
    handles: SyncHandles,
    warnings: usize,
    errors: usize,
}

impl Replay {
    async fn run_step(&mut self, index: usize, step: Step) -> Result<()> {
        let label = format!("{:>3}.", index + 1);
        match step {
            Step::Editor(command) => {
                debug!(?command, "Executing");
                let name = command_name(&command);
                match self.core.execute(command) {
                    Ok(Some(created)) => {
                        println!("  {} {} {} {}", label.dimmed(), "✓".green(), name, created.bright_white())
                    }
                    Ok(None) => println!("  {} {} {}", label.dimmed(), "✓".green(), name),
                    Err(e) => self.report_local(&label, &name, &e),
                }
            }
            Step::Remote(step) => {
                // Backend actions see every queued local edit
                self.worker.drain().await;
                self.run_remote(&label, step).await?;
            }
        }

        self.worker.drain().await;
        self.print_notices();
        Ok(())
    }

    async fn run_remote(&mut self, label: &str, step: RemoteStep) -> Result<()> {
        let gateway: Arc<dyn PersistenceGateway> = self.gateway.clone();
        let site_id = self.core.site().id.clone();

        let outcome = match step {
            RemoteStep::SaveVersion { message } => {
                let page = self
                    .core
                    .active_page()
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("No active page"))?;
                let versions = VersionManager::new(gateway);
                versions
                    .save(&site_id, &page, message)
                    .await
                    .map(|v| format!("saved version {} of {}", v.version_number, page.id))
            }
            RemoteStep::RestoreVersion { version } => {
                let page_id = self.active_page_id()?;
                let versions = VersionManager::new(gateway);
                let listed = versions.list(&page_id).await;
                match listed.map(|all| all.into_iter().find(|v| v.version_number == version)) {
                    Ok(Some(found)) => versions
                        .restore(&site_id, &page_id, &found.id)
                        .await
                        .map(|page| {
                            self.core.reload_page(page);
                            format!("restored version {} of {}", version, page_id)
                        }),
                    Ok(None) => {
                        anyhow::bail!("Page {} has no version {}", page_id, version)
                    }
                    Err(e) => Err(e),
                }
            }
            RemoteStep::Publish => SiteOperations::new(gateway)
                .publish(&site_id)
                .await
                .map(|receipt| {
                    let url = receipt.url.clone();
                    self.core.apply_publish_state(Some(receipt));
                    format!("published at {}", url)
                }),
            RemoteStep::Unpublish => SiteOperations::new(gateway)
                .unpublish(&site_id)
                .await
                .map(|()| {
                    self.core.apply_publish_state(None);
                    "unpublished".to_string()
                }),
        };

        match outcome {
            Ok(message) => println!("  {} {} {}", label.dimmed(), "✓".green(), message),
            Err(e) => {
                self.errors += 1;
                println!("  {} {} {}", label.dimmed(), "✗".red(), Notice::from(&e));
            }
        }
        Ok(())
    }

    fn active_page_id(&self) -> Result<String> {
        self.core
            .session()
            .active_page_id
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No active page"))
    }

    fn report_local(&mut self, label: &str, name: &str, error: &EditorError) {
        let notice = Notice::from(error);
        match notice.level {
            NoticeLevel::Error => {
                self.errors += 1;
                println!("  {} {} {}: {}", label.dimmed(), "✗".red(), name, notice.message);
            }
            _ => {
                self.warnings += 1;
                println!("  {} {} {}: {}", label.dimmed(), "⚠".yellow(), name, notice.message);
            }
        }
    }

    fn print_notices(&mut self) {
        while let Ok(notice) = self.handles.notices.try_recv() {
            self.errors += 1;
            println!("      {} {}", "✗".red(), notice);
        }
    }
}

fn command_name(command: &EditorCommand) -> String {
    serde_json::to_value(command)
        .ok()
        .and_then(|v| v.get("op").and_then(|op| op.as_str()).map(str::to_string))
        .unwrap_or_else(|| "command".to_string())
}

pub async fn replay(args: ReplayArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.site)
        .with_context(|| format!("Failed to read site {}", args.site.display()))?;
    let site: Site = serde_json::from_str(&content)
        .with_context(|| format!("Invalid site file {}", args.site.display()))?;
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let steps = parse_script(&script)?;

    let config = load_config(&args.site, args.config.as_deref())?;
    let catalog = load_catalog(&args.site, args.catalog.as_deref())?;

    let gateway = Arc::new(match &args.store {
        Some(path) => MemoryGateway::open(path).await?,
        None => MemoryGateway::new(),
    });
    gateway.insert_site(site.clone()).await?;

    println!(
        "🛠  {} {} ({} steps)",
        "Replaying".green().bold(),
        site.name.bright_white(),
        steps.len()
    );
    println!();

    let (outbox, requests) = Outbox::channel();
    let (worker, handles) = SyncWorker::new(gateway.clone(), requests);
    let core = EditorCore::new(site, Arc::new(catalog), outbox, config);

    let mut replay = Replay {
        core,
        gateway,
        worker,
        handles,
        warnings: 0,
        errors: 0,
    };

    for (index, step) in steps.into_iter().enumerate() {
        replay.run_step(index, step).await?;
    }
    replay.core.flush_pending_edit();
    replay.worker.drain().await;
    replay.print_notices();

    let out = args.out.unwrap_or(args.site);
    let json = serde_json::to_string_pretty(replay.core.site())?;
    std::fs::write(&out, json).with_context(|| format!("Failed to write {}", out.display()))?;

    let status = replay.handles.status.borrow().clone();
    println!();
    println!(
        "✨ {} Replay complete!",
        if replay.errors > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Output: {}", out.display());
    if let Some(at) = status.last_synced_at {
        println!("   Last synced: {}", at.to_rfc3339());
    }
    if replay.warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), replay.warnings);
    }
    if replay.errors > 0 {
        println!("   {} {}", "Errors:".red(), replay.errors);
    }

    Ok(())
}
