//! Database preparation command

use std::path::Path;

use anyhow::{Context, Result};
use mdwiki_server::PageRepo;

use super::{load_config, open_database, DatabaseArgs};

/// Create the schema and report how many pages are stored
pub async fn run_migrate(args: DatabaseArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.apply(&mut config);

    let pool = open_database(&config).await?;
    let count = PageRepo::new(&pool)
        .count()
        .await
        .context("Failed to count pages")?;

    println!("Database ready at {} ({} pages)", config.database.url, count);
    Ok(())
}
