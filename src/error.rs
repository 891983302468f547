use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::check::CheckError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("MySQL check failed: {0}")]
    Unavailable(#[from] CheckError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The cause stays server-side; callers only see the status
        let status = match self {
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        let reason = status.canonical_reason().unwrap_or_default();

        (status, reason).into_response()
    }
}
