use crate::services::stager::StagingError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StagingError> for AppError {
    fn from(err: StagingError) -> Self {
        match err {
            StagingError::MissingPath | StagingError::InvalidTarget { .. } => {
                AppError::BadRequest(err.to_string())
            }
            StagingError::NotStaged(_) => AppError::NotFound(err.to_string()),
            StagingError::Storage(e) => AppError::Internal(format!("{:#}", e)),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg,
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                msg
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_error_mapping() {
        let bad = AppError::from(StagingError::MissingPath);
        assert!(matches!(bad, AppError::BadRequest(ref m) if m == "No file path provided"));
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let invalid = AppError::from(StagingError::InvalidTarget {
            path: "x.txt".to_string(),
        });
        assert!(matches!(
            invalid,
            AppError::BadRequest(ref m) if m == "Invalid PCB file path or file does not exist"
        ));

        let missing = AppError::from(StagingError::NotStaged("a.pcb".to_string()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let io = AppError::from(StagingError::Storage(
            anyhow::anyhow!("disk full").context("failed to copy board.pcb into staging"),
        ));
        assert!(matches!(
            io,
            AppError::Internal(ref m) if m == "failed to copy board.pcb into staging: disk full"
        ));
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::NotFound("gone".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
