//! JSON bodies returned by the upload endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::dedup::{Outcome, Submission};
use crate::error::Error;

/// Value of the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Duplicate,
    Error,
}

/// Response body for `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: UploadStatus,
    pub message: String,
    pub hash: Option<String>,
}

impl UploadResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: UploadStatus::Error,
            message: message.into(),
            hash: None,
        }
    }
}

impl From<&Submission> for UploadResponse {
    fn from(submission: &Submission) -> Self {
        match &submission.outcome {
            Outcome::Accepted(digest) => Self {
                status: UploadStatus::Success,
                message: "Bill added successfully!".to_string(),
                hash: Some(digest.clone()),
            },
            Outcome::Duplicate(digest) => Self {
                status: UploadStatus::Duplicate,
                message: "Duplicate bill detected!".to_string(),
                hash: Some(digest.clone()),
            },
        }
    }
}

impl IntoResponse for UploadResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl Error {
    /// Returns the HTTP status code for this error.
    ///
    /// Anything the client can fix by resubmitting is a 400 (413 for an
    /// oversized body); the rest are failures on our side.
    pub fn status_code(&self) -> StatusCode {
        if let Error::UploadTooLarge(_) = self {
            StatusCode::PAYLOAD_TOO_LARGE
        } else if self.is_user_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures may carry filesystem paths; keep them in the log.
        let body = if self.is_user_error() {
            UploadResponse::error(self.to_string())
        } else {
            tracing::error!("Upload failed: {}", self);
            match self {
                Error::UnreadableFile(_) => UploadResponse::error("Could not read uploaded bill"),
                _ => UploadResponse::error("Internal server error"),
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            Error::MissingField("amount".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::InvalidAmount("abc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::InvalidDate("2024/01/01".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::UploadTooLarge(1024).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            Error::UnreadableFile(PathBuf::from("uploads/x")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Io(std::io::Error::other("disk full")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_status_serialization() {
        let body = UploadResponse::error("Missing fields");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Missing fields");
        assert!(json["hash"].is_null());
    }

    #[tokio::test]
    async fn test_internal_error_response_hides_path() {
        let response =
            Error::UnreadableFile(PathBuf::from("/srv/uploads/secret.pdf")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: UploadResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, UploadStatus::Error);
        assert_eq!(body.message, "Could not read uploaded bill");
        assert!(!String::from_utf8_lossy(&bytes).contains("secret.pdf"));
    }
}
