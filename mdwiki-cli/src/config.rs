use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mdwiki_core::WikiConfig;

/// Commented template written by `config init`
const CONFIG_TEMPLATE: &str = include_str!("../config.template.toml");

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a commented config file
    Init(InitArgs),
    /// Print the effective config (file + environment) as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(WikiConfig::config_path);

    match args.command {
        ConfigCommands::Init(args) => run_init(args, &path),
        ConfigCommands::Show => run_show(config_path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run_init(args: InitArgs, config_path: &Path) -> Result<()> {
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(config_path, CONFIG_TEMPLATE)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("Created config at: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {}", config_path.display());
    println!("  2. Run: mdwiki serve");

    Ok(())
}

fn run_show(config_path: Option<&Path>) -> Result<()> {
    let config = WikiConfig::load(config_path).context("Failed to load configuration")?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let config: WikiConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, WikiConfig::default());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        run_init(InitArgs { force: false }, &path).unwrap();
        assert!(path.exists());

        assert!(run_init(InitArgs { force: false }, &path).is_err());
        run_init(InitArgs { force: true }, &path).unwrap();
    }
}
