mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    init, outline, replay, versions, InitArgs, OutlineArgs, ReplayArgs, VersionsArgs,
};

/// Pagewright CLI - drive the page builder's editor core from the terminal
#[derive(Parser, Debug)]
#[command(name = "pagewright")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a starter site, config and component catalog
    Init(InitArgs),

    /// Apply a JSON command script to a site file
    Replay(ReplayArgs),

    /// Print the component tree of each page
    Outline(OutlineArgs),

    /// List saved versions of a page
    Versions(VersionsArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Init(args) => match std::env::current_dir() {
            Ok(cwd) => init(args, &cwd.display().to_string()),
            Err(e) => Err(anyhow::anyhow!("Cannot get current directory: {}", e)),
        },
        Command::Replay(args) => replay(args).await,
        Command::Outline(args) => outline(args),
        Command::Versions(args) => versions(args).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
