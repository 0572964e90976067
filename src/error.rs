//! Request-level errors and their HTTP rendering.
//!
//! An absent variant directory is not an error at all: it lists as empty.
//! What remains is a client asking for something that is not there.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::types::UnknownVariant;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// A variant outside `{desktop, mobile}`. 400 with a JSON body.
    #[error("invalid variant: {0:?}")]
    InvalidVariant(String),
    /// Missing file, unknown variant on a file route, disabled route.
    #[error("not found: {0}")]
    NotFound(String),
}

impl SiteError {
    /// File and page routes answer 404 for a bad variant, like any missing path.
    pub fn into_not_found(self) -> Self {
        match self {
            SiteError::InvalidVariant(v) => SiteError::NotFound(format!("variant {v:?}")),
            other => other,
        }
    }
}

impl From<UnknownVariant> for SiteError {
    fn from(err: UnknownVariant) -> Self {
        SiteError::InvalidVariant(err.0)
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match self {
            SiteError::InvalidVariant(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid variant" })),
            )
                .into_response(),
            SiteError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        }
    }
}
