//! # API Errors
//!
//! Every failure a handler can return, mapped to an HTTP status and a JSON
//! body of the form `{"error": "..."}`.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::processing::StegoError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required form field was not sent.
    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    /// The multipart body could not be read.
    #[error("failed to read multipart data: {message}")]
    Multipart { status: StatusCode, message: String },

    /// The message does not fit in the uploaded image.
    #[error(transparent)]
    Capacity(#[from] StegoError),

    /// The blocking task running the steganography core did not complete.
    #[error("steganography task failed: {0}")]
    Internal(#[from] tokio::task::JoinError),
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::Multipart {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // An absent upload is reported as not found.
            ApiError::MissingField(_) => StatusCode::NOT_FOUND,
            ApiError::Multipart { status, .. } => *status,
            ApiError::Capacity(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
