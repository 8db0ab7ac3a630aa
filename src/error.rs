//! HTTP boundary errors.
//!
//! Route handlers return `ApiError`; the `IntoResponse` impl maps each
//! variant to the status and body existing clients expect. The
//! `message`/`error` body-key split between endpoints is part of the public
//! contract and must not be unified. Internals are logged, never leaked.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::services::forward::ForwardError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// `POST /api/apply` without name, email, and a resume link or file.
    #[error("missing required application fields")]
    MissingFields,
    /// `POST /uploadAttachment` without a file part.
    #[error("no file uploaded")]
    NoFileUploaded,
    /// Attachment hand-off to the upstream service failed.
    #[error("attachment forward failed: {0}")]
    UploadFailed(#[from] ForwardError),
    /// Reading the multipart stream or spooling a file to disk failed.
    #[error("upload read failed: {0}")]
    BadUpload(String),
    /// Application insert failed.
    #[error("application store error: {0}")]
    ApplicationStore(sqlx::Error),
    /// Internship listing read failed.
    #[error("internship store error: {0}")]
    ListingStore(sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::MissingFields => {
                (StatusCode::BAD_REQUEST, json!({ "message": "Missing required fields!" }))
            }
            Self::NoFileUploaded => (StatusCode::BAD_REQUEST, json!({ "error": "No file uploaded" })),
            Self::UploadFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Upload failed" }))
            }
            Self::BadUpload(_) | Self::ApplicationStore(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "Internal Server Error" }))
            }
            Self::ListingStore(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal Server Error" }))
            }
        };

        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
