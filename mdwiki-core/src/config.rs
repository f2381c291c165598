//! Configuration for mdwiki
//!
//! Resolution order, last wins:
//! 1. built-in defaults
//! 2. `~/.mdwiki/config.toml` (or an explicit `--config` path)
//! 3. environment: `MDWIKI_HOST`, `MDWIKI_PORT`, `DATABASE_URL`
//! 4. command-line flags (applied by the binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WikiError};
use crate::markdown::RenderOptions;

pub const ENV_HOST: &str = "MDWIKI_HOST";
pub const ENV_PORT: &str = "MDWIKI_PORT";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikiConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub markdown: RenderOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Per-request timeout
    pub request_timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://db/wiki.db".to_string(),
            max_connections: 30,
        }
    }
}

impl WikiConfig {
    /// Default config file path: ~/.mdwiki/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mdwiki")
            .join("config.toml")
    }

    /// Load config from `explicit` or the default path, then apply
    /// environment overrides.
    ///
    /// An explicit path that does not exist is an error. A missing default
    /// file just means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(WikiError::config_not_found(path));
                }
                Self::from_file(path)?
            }
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content).map_err(|e| WikiError::config_parse(path, e))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.parse().map_err(|_| WikiError::InvalidEnv {
                var: ENV_PORT,
                value: port.clone(),
            })?;
        }

        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database.url = url;
        }

        Ok(())
    }

    /// `host:port` for binding the listener. IPv6 hosts are bracketed.
    pub fn bind_addr(&self) -> String {
        let host = &self.server.host;
        if host.contains(':') && !host.starts_with('[') {
            format!("[{}]:{}", host, self.server.port)
        } else {
            format!("{}:{}", host, self.server.port)
        }
    }

    /// Serialize the effective config.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
