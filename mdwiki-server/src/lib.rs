//! mdwiki-server: server-rendered markdown wiki
//!
//! - [`db`]: SQLite pool, schema migrations, page repository
//! - [`templates`]: embedded minijinja templates
//! - [`http`]: axum router, handlers, error pages, server loop

pub mod db;
pub mod http;
pub mod templates;

pub use db::{create_pool, create_pool_with_options, DbError, PageRepo};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
pub use templates::{TemplateError, Templates};
