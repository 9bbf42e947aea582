mod bootstrap;
mod config_cmd;
mod exec_cmd;
mod serve_cmd;
mod status_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use folio_config::{config_dir, config_file_path};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio: portfolio backend with an interactive terminal")]
#[command(version)]
struct Cli {
    /// Path to config.yaml (defaults to $FOLIO_CONFIG_DIR or ~/.folio)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Query a running server's health endpoint
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one terminal command against the seeded store and print its output
    Exec {
        /// The command line, e.g. "projects featured"
        line: String,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config with secrets redacted
    Show,
    /// Write a config file populated with defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| config_file_path(&config_dir()));

    match cli.command {
        Commands::Serve { port } => serve_cmd::run(&config_path, port).await,
        Commands::Status { port } => status_cmd::run(&config_path, port).await,
        Commands::Exec { line } => exec_cmd::run(&config_path, &line).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => config_cmd::show(&config_path).await,
            ConfigAction::Init { force } => config_cmd::init(&config_path, force).await,
        },
    }
}
