//! mdwiki CLI - server-rendered markdown wiki
//!
//! - `serve`: prepare the database and run the HTTP server
//! - `migrate`: create or upgrade the database schema
//! - `pages`: list stored pages
//! - `config`: manage the config file

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "mdwiki",
    author,
    version,
    about = "A small server-rendered markdown wiki",
    long_about = "Serve a wiki whose pages are stored as markdown in an embedded SQLite \
                  database and rendered to HTML on every view."
)]
struct Cli {
    /// Config file (default: ~/.mdwiki/config.toml)
    #[arg(long, global = true, env = "MDWIKI_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prepare the database and run the HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema if needed
    Migrate(commands::DatabaseArgs),
    /// List stored pages
    Pages(commands::pages::PagesArgs),
    /// Manage mdwiki configuration (init, show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, config_path).await,
        Commands::Migrate(args) => commands::run_migrate(args, config_path).await,
        Commands::Pages(args) => commands::run_pages(args, config_path).await,
        Commands::Config(args) => config::run_config(args, config_path),
    }
}
