//! HTTP server command
//!
//! Prepares the database first; the server only starts once the schema
//! is in place.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use mdwiki_core::WikiConfig;
use mdwiki_server::{run_server, ServerConfig};

use super::{load_config, open_database, DatabaseArgs};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to, as host:port (default: 127.0.0.1:8080)
    #[arg(long, short = 'b', value_name = "ADDR")]
    pub bind: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    fn apply(&self, config: &mut WikiConfig) -> Result<()> {
        self.database.apply(config);

        if let Some(bind) = &self.bind {
            let (host, port) = bind
                .rsplit_once(':')
                .with_context(|| format!("Invalid bind address '{}', expected host:port", bind))?;
            config.server.host = host.trim_matches(|c| c == '[' || c == ']').to_string();
            config.server.port = port
                .parse()
                .with_context(|| format!("Invalid port in bind address '{}'", bind))?;
        }

        if let Some(timeout) = self.timeout {
            config.server.request_timeout_secs = timeout;
        }

        Ok(())
    }
}

/// Resolve `host:port`, which may name a host rather than an IP.
async fn resolve_bind_addr(addr: &str) -> Result<SocketAddr> {
    tokio::net::lookup_host(addr)
        .await
        .with_context(|| format!("Could not resolve bind address {}", addr))?
        .next()
        .with_context(|| format!("No address found for {}", addr))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = load_config(config_path)?;
    args.apply(&mut config)?;

    let bind_addr = resolve_bind_addr(&config.bind_addr()).await?;
    tracing::info!(database = %config.database.url, "Starting mdwiki on {}", bind_addr);

    let pool = open_database(&config).await?;

    let server_config = ServerConfig {
        bind_addr,
        request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        markdown: config.markdown,
    };

    // Run server (blocks until shutdown)
    run_server(pool, server_config)
        .await
        .context("Could not start http server")?;

    Ok(())
}
