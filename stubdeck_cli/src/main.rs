//! Stubdeck CLI - Manage mock mappings from the terminal
//!
//! Usage:
//!   stubdeck console [--view <VIEW>]   Interactive console
//!   stubdeck ls                        List mappings
//!   stubdeck show <ID>                 Print one mapping
//!   stubdeck create [OPTIONS]          Create a mapping
//!   stubdeck edit <ID> --response ...  Replace a mapping's response
//!   stubdeck rm <ID>                   Delete a mapping
//!   stubdeck save                      Save mappings to files
//!   stubdeck reset                     Clear in-memory mappings
//!   stubdeck export [--out <FILE>]     Write the mappings page as HTML
//!   stubdeck open                      Open the mappings page in a browser

mod api;
mod commands;
mod config;
mod deck;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stubdeck")]
#[command(author = "Stubdeck Team")]
#[command(version)]
#[command(about = "Manage HTTP mock mappings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Console server URL (overrides config.yml)
    #[arg(long, global = true, env = "STUBDECK_SERVER")]
    server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal console
    Console {
        /// Start view (home, mocks, create or a #hash)
        #[arg(long)]
        view: Option<String>,
    },

    /// List mappings
    Ls,

    /// Print one mapping as JSON
    Show {
        /// Mapping ID
        id: String,
    },

    /// Create a mapping
    Create {
        /// Display name
        #[arg(long, default_value = "")]
        name: String,

        /// HTTP method (default GET)
        #[arg(short, long, default_value = "")]
        method: String,

        /// URL to match; prefix with regex: for a pattern (default /)
        #[arg(short, long, default_value = "")]
        url: String,

        /// Response status (default 200)
        #[arg(short, long, default_value = "")]
        status: String,

        /// Response headers as a JSON object
        #[arg(long, default_value = "")]
        headers: String,

        /// Raw response body
        #[arg(short, long, default_value = "")]
        body: String,
    },

    /// Replace a mapping's response
    Edit {
        /// Mapping ID
        id: String,

        /// Response JSON, or @file to read it from a file
        #[arg(short, long)]
        response: String,
    },

    /// Delete a mapping
    Rm {
        /// Mapping ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Save in-memory mappings to files
    Save,

    /// Clear in-memory mappings
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write the mappings page as a standalone HTML file
    Export {
        /// Output file (default: stubdeck-mappings-<timestamp>.html)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Open the server's mappings page in the browser
    Open,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Ensure config directories exist
    config::ensure_dirs()?;

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{},stubdeck_cli=info", log_level).into());

    if matches!(cli.command, Commands::Console { .. }) {
        // The terminal belongs to the TUI; log to a file instead
        let log_path = config::logs_dir().join("console.log");
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(log_file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
    }

    let config = config::Config::load()?;
    let server_url = config.server_url(cli.server.as_deref());
    tracing::debug!("Using server {}", server_url);

    // Handle commands
    match cli.command {
        Commands::Console { view } => {
            commands::interactive::run(&server_url, view).await?;
        }

        Commands::Open => {
            commands::mappings::open_page(&config.page_url(cli.server.as_deref()))?;
        }

        command => {
            let api = api::HttpApi::new(&server_url)?;
            run_mapping_command(&api, command).await?;
        }
    }

    Ok(())
}

async fn run_mapping_command(api: &api::HttpApi, command: Commands) -> Result<()> {
    use commands::mappings;

    match command {
        Commands::Ls => mappings::list(api).await,
        Commands::Show { id } => mappings::show(api, &id).await,
        Commands::Create {
            name,
            method,
            url,
            status,
            headers,
            body,
        } => {
            let form = deck::CreateForm {
                name,
                method,
                url,
                status,
                headers,
                body,
            };
            mappings::create(api, form).await
        }
        Commands::Edit { id, response } => mappings::edit(api, &id, &response).await,
        Commands::Rm { id, yes } => mappings::remove(api, &id, yes).await,
        Commands::Save => mappings::save(api).await,
        Commands::Reset { yes } => mappings::reset(api, yes).await,
        Commands::Export { out } => mappings::export(api, out).await,
        Commands::Console { .. } | Commands::Open => Ok(()),
    }
}
