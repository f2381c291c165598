//! Database layer - connection pool, migrations and repositories
//!
//! - SQLite through an sqlx pool; no shared `Arc<Mutex<Connection>>`
//! - Rely on the UNIQUE constraint for duplicate names, no check-then-insert

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options};
pub use sqlx::SqlitePool;
pub use repos::{DbError, PageRepo};
