//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use mdwiki_core::{PageName, ValidationError};

use super::error::ApiError;

/// Url-encoded form body whose rejections render as HTML error pages
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(ApiError))]
pub struct WikiForm<T>(pub T);

/// Extract and validate a page name from the path
pub struct ValidPageName(pub PageName);

impl<S> FromRequestParts<S> for ValidPageName
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(name): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest {
                message: rejection.body_text(),
            })?;

        let page_name = PageName::new(&name)?;
        Ok(Self(page_name))
    }
}

/// Parse a page id posted by a form.
pub fn parse_page_id(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "id" });
    }
    raw.parse().map_err(|_| ValidationError::InvalidValue {
        field: "id",
        value: raw.to_owned(),
    })
}
