//! HTTP error mapping.
//!
//! # Invariants
//! - Every failure response body is `{"error": <message>}`.
//! - Not-found responses always carry the fixed message `Item not found`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use items_core::{RepoError, ValidationError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const ITEM_NOT_FOUND: &str = "Item not found";

/// Request-terminal failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound => "not_found",
            Self::Internal(_) => "internal",
        }
    }

    /// Create reports every repository failure as a client error.
    pub(crate) fn create_failure(err: RepoError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) | Self::Internal(message) => f.write_str(message),
            Self::NotFound => f.write_str(ITEM_NOT_FOUND),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::NotFound,
            RepoError::Validation(err) => Self::BadRequest(err.to_string()),
            other @ (RepoError::Db(_) | RepoError::InvalidData(_)) => {
                Self::Internal(other.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::BadRequest(value.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
