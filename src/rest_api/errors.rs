//! REST API error surface
//!
//! Every failure leaving the API is serialized as `{"message": ...}`.
//! Request decoding failures are the caller's fault and map to 400;
//! everything past decoding is a server-side 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Failures surfaced by the REST handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body was not a decodable document
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A record could not be encoded for storage
    #[error("Failed to encode document: {0}")]
    Encode(String),

    /// A stored document could not be decoded into a record
    #[error("Failed to decode stored document: {0}")]
    Decode(String),

    /// The store rejected or failed an operation
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status the error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Encode(_) | ApiError::Decode(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(error: &ApiError) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody::from(&self);
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
