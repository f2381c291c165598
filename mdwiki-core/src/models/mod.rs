//! Domain models with validation at construction
//!
//! User input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod page;
pub mod validation;

pub use page::{Page, PageName, EMPTY_PAGE_CONTENT, MISSING_PAGE_ID};
pub use validation::ValidationError;
