//! mdwiki-core: shared building blocks for the mdwiki server and CLI
//!
//! - [`models`]: validated page names and page records
//! - [`markdown`]: markdown to HTML rendering
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: library error type

pub mod config;
pub mod error;
pub mod markdown;
pub mod models;

pub use config::WikiConfig;
pub use error::{Result, WikiError};
pub use markdown::RenderOptions;
pub use models::{Page, PageName, ValidationError};
