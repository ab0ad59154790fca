//! Records Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type RecordsResult<T> = Result<T, RecordsError>;

#[derive(Debug, Error)]
pub enum RecordsError {
    /// Identifier is not a well-formed record id
    #[error("Invalid record id")]
    InvalidId,

    /// Missing, blank or oversized field, or an unreadable body
    #[error("{0}")]
    InvalidInput(String),

    /// Well-formed id with no matching record
    #[error("Record not found")]
    NotFound,

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RecordsError {
    fn from(err: sqlx::Error) -> Self {
        if kernel::error::conversions::is_store_unavailable(&err) {
            RecordsError::StoreUnavailable(err.to_string())
        } else {
            RecordsError::Database(err)
        }
    }
}

impl From<tokio::time::error::Elapsed> for RecordsError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        RecordsError::StoreUnavailable("store call timed out".to_string())
    }
}

impl RecordsError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordsError::InvalidId | RecordsError::InvalidInput(_) => ErrorKind::BadRequest,
            RecordsError::NotFound => ErrorKind::NotFound,
            RecordsError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
            RecordsError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            RecordsError::StoreUnavailable(_) => {
                AppError::service_unavailable("Record store unavailable")
                    .with_action("Retry later")
            }
            // Store internals stay in the log
            RecordsError::Database(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    pub(crate) fn log(&self) {
        match self {
            RecordsError::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "Record store unavailable");
            }
            RecordsError::Database(e) => {
                tracing::error!(error = %e, "Records database error");
            }
            _ => {
                tracing::debug!(error = %self, "Records client error");
            }
        }
    }
}

impl IntoResponse for RecordsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
