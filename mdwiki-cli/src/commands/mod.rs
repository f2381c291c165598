//! Command implementations for the mdwiki CLI

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use mdwiki_core::WikiConfig;
use mdwiki_server::db::{create_pool_with_options, migrations, SqlitePool};

pub mod migrate;
pub mod pages;
pub mod serve;

pub use migrate::run_migrate;
pub use pages::run_pages;
pub use serve::run_serve;

/// Database flags shared by every command that opens the wiki
#[derive(Args, Debug, Default)]
pub struct DatabaseArgs {
    /// Database URL (overrides config and DATABASE_URL)
    #[arg(long, value_name = "URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, value_name = "N")]
    pub max_connections: Option<u32>,
}

impl DatabaseArgs {
    /// Apply flags on top of the loaded config.
    pub fn apply(&self, config: &mut WikiConfig) {
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
    }
}

/// Load config from file and environment.
pub fn load_config(path: Option<&Path>) -> Result<WikiConfig> {
    WikiConfig::load(path).context("Failed to load configuration")
}

/// Open the pool and make sure the schema exists.
pub async fn open_database(config: &WikiConfig) -> Result<SqlitePool> {
    let pool = create_pool_with_options(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("Could not open database {}", config.database.url))?;

    migrations::run(&pool)
        .await
        .context("Database preparation error")?;

    Ok(pool)
}
