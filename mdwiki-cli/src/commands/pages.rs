//! Page listing command

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use mdwiki_server::PageRepo;

use super::{load_config, open_database, DatabaseArgs};

#[derive(Parser, Debug)]
pub struct PagesArgs {
    /// Print a JSON array instead of one name per line
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Print all page names in index order
pub async fn run_pages(args: PagesArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.database.apply(&mut config);

    let pool = open_database(&config).await?;
    let names = PageRepo::new(&pool)
        .all_names()
        .await
        .context("Failed to list pages")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }

    Ok(())
}
