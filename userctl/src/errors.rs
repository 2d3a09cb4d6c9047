use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Invalid request data
    #[error("{message}")]
    BadRequest { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Generic internal service error
    #[error("Failed to {operation}")]
    Internal { operation: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Database(db_err) => match db_err {
                DbError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
                DbError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                DbError::TimedOut => StatusCode::GATEWAY_TIMEOUT,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::BadRequest { message } => message.clone(),
            Error::NotFound { resource, id } => {
                format!("{resource} with ID {id} not found")
            }
            Error::Internal { .. } => "Internal server error".to_string(),
            Error::Database(db_err) => match db_err {
                DbError::CheckViolation { table, .. } => match table.as_deref() {
                    Some("users") => "User name must not be empty".to_string(),
                    _ => "Invalid data provided".to_string(),
                },
                DbError::Cancelled => "Service is shutting down".to_string(),
                DbError::TimedOut => "Database operation timed out".to_string(),
                DbError::Other(_) => "Database error occurred".to_string(),
            },
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Database(DbError::Other(_)) | Error::Internal { .. } => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(DbError::Cancelled | DbError::TimedOut) => {
                tracing::warn!("Database operation aborted: {}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::BadRequest { .. } | Error::NotFound { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        (self.status_code(), self.user_message()).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                Error::BadRequest {
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                Error::NotFound {
                    resource: "User".to_string(),
                    id: "1".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (Error::Database(DbError::Cancelled), StatusCode::SERVICE_UNAVAILABLE),
            (Error::Database(DbError::TimedOut), StatusCode::GATEWAY_TIMEOUT),
            (
                Error::Database(DbError::Other(anyhow::anyhow!("connection refused"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{error:?}");
        }
    }

    #[test]
    fn test_store_fault_message_hides_details() {
        let error = Error::Database(DbError::Other(anyhow::anyhow!("password authentication failed for user postgres")));
        assert_eq!(error.user_message(), "Database error occurred");
    }

    #[test]
    fn test_internal_error_hides_operation() {
        let error = Error::Internal {
            operation: "Config validation: database.url cannot be empty".to_string(),
        };
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.user_message(), "Internal server error");
        assert_eq!(error.to_string(), "Failed to Config validation: database.url cannot be empty");
    }

    #[test]
    fn test_not_found_message() {
        let error = Error::NotFound {
            resource: "User".to_string(),
            id: "999".to_string(),
        };
        assert_eq!(error.user_message(), "User with ID 999 not found");
    }
}
