//! atscope CLI - explore AT Protocol records and repositories from the terminal.

use atscope_explorer::ExplorerConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{link, normalize, record, render, repo, resolve};

#[derive(Parser)]
#[command(name = "atscope")]
#[command(about = "AT Protocol record and repository explorer")]
struct Cli {
    /// Path to a YAML configuration file (default: $ATSCOPE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize input into a coordinate or endpoint (offline)
    Normalize {
        /// DID, handle, AT URI, or URL
        input: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve input to a DID and serving endpoint
    Resolve {
        /// DID, handle, AT URI, or URL
        input: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch, authenticate and render one record
    Record {
        /// AT URI or first-party post URL
        input: String,
        /// Fetch from this serving endpoint instead of resolving one
        #[arg(long)]
        pds: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Describe a repository
    Repo {
        /// DID, handle, or anything naming the repository
        input: String,
        /// Describe from this serving endpoint instead of resolving one
        #[arg(long)]
        pds: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a record value from a file or stdin (offline)
    Render {
        /// Input JSON file (or stdin if not provided)
        file: Option<PathBuf>,
        /// DID of the repository owning any blobs in the value
        #[arg(long)]
        repo: String,
        /// Output the presentation tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the third-party link for a record URI (offline)
    Link {
        /// at://repo/collection/rkey
        uri: String,
    },
}

async fn run(cli: Cli) -> commands::CommandResult {
    let config = ExplorerConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Normalize { input, json } => normalize::run(&input, json),
        Commands::Resolve { input, json } => resolve::run(&config, &input, json).await,
        Commands::Record { input, pds, json } => {
            record::run(&config, &input, pds.as_deref(), json).await
        }
        Commands::Repo { input, pds, json } => {
            repo::run(&config, &input, pds.as_deref(), json).await
        }
        Commands::Render { file, repo, json } => render::run(&config, file, &repo, json),
        Commands::Link { uri } => link::run(&uri),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atscope=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(Cli::parse()).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
