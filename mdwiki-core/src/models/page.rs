//! Wiki page name and record

use std::fmt;

use serde::Serialize;

use super::ValidationError;

/// Maximum length for page names, matching the `name` column width
pub const MAX_PAGE_NAME_LEN: usize = 255;

/// Id shown for a page that has not been saved yet
pub const MISSING_PAGE_ID: i64 = -1;

/// Content shown for a page that has not been saved yet
pub const EMPTY_PAGE_CONTENT: &str = "This page is empty";

/// Validated page name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageName(String);

impl PageName {
    /// Create a page name, trimming surrounding whitespace.
    ///
    /// # Rules
    /// - Not empty once trimmed
    /// - At most 255 characters
    /// - No `/` (names are a single path segment under `/wiki/`)
    /// - No control characters
    /// - Not made only of dots (`.` and `..` collapse out of `/wiki/` URLs)
    ///
    /// # Example
    /// ```
    /// use mdwiki_core::models::PageName;
    ///
    /// assert_eq!(PageName::new("  Getting Started ").unwrap().as_str(), "Getting Started");
    /// assert!(PageName::new("   ").is_err());
    /// assert!(PageName::new("a/b").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ValidationError::Empty { field: "page name" });
        }

        if s.chars().count() > MAX_PAGE_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "page name",
                max: MAX_PAGE_NAME_LEN,
            });
        }

        if s.contains('/') {
            return Err(ValidationError::InvalidFormat {
                field: "page name",
                reason: "must not contain '/'",
            });
        }

        if s.chars().all(|c| c == '.') {
            return Err(ValidationError::InvalidFormat {
                field: "page name",
                reason: "must not consist only of dots",
            });
        }

        if s.chars().any(char::is_control) {
            return Err(ValidationError::InvalidFormat {
                field: "page name",
                reason: "must not contain control characters",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the page name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for PageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored wiki page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub id: i64,
    pub name: String,
    /// Raw markdown
    pub content: String,
}

impl Page {
    /// Placeholder for a page that does not exist yet.
    pub fn placeholder(name: &PageName) -> Self {
        Self {
            id: MISSING_PAGE_ID,
            name: name.as_str().to_owned(),
            content: EMPTY_PAGE_CONTENT.to_owned(),
        }
    }

    /// True for a page that has never been saved.
    pub fn is_new(&self) -> bool {
        self.id == MISSING_PAGE_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names() {
        assert!(PageName::new("Home").is_ok());
        assert!(PageName::new("Getting started").is_ok());
        assert!(PageName::new("Ünïcödé page").is_ok());
        assert!(PageName::new("a").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let name = PageName::new("\t Notes \n").unwrap();
        assert_eq!(name.as_str(), "Notes");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            PageName::new("").unwrap_err(),
            ValidationError::Empty { field: "page name" }
        );
        assert!(matches!(
            PageName::new("   ").unwrap_err(),
            ValidationError::Empty { .. }
        ));
    }

    #[test]
    fn rejects_slash() {
        let err = PageName::new("foo/bar").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_dot_only_names() {
        for name in [".", "..", " ... "] {
            let err = PageName::new(name).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidFormat { .. }), "{name}");
        }
        assert!(PageName::new("v1.2").is_ok());
        assert!(PageName::new(".hidden").is_ok());
    }

    #[test]
    fn rejects_control_chars() {
        let err = PageName::new("foo\u{0}bar").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn max_length_counts_chars() {
        let name_255 = "é".repeat(255);
        assert!(PageName::new(&name_255).is_ok());

        let name_256 = "a".repeat(256);
        let err = PageName::new(&name_256).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }

    #[test]
    fn placeholder_is_new() {
        let name = PageName::new("Missing").unwrap();
        let page = Page::placeholder(&name);
        assert!(page.is_new());
        assert_eq!(page.id, MISSING_PAGE_ID);
        assert_eq!(page.content, EMPTY_PAGE_CONTENT);
        assert_eq!(page.name, "Missing");
    }
}
