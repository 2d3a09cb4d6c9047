use thiserror::Error;

/// Unified error type for database operations that application code can handle
#[derive(Error, Debug)]
pub enum DbError {
    /// Check constraint violation (e.g. an empty user name)
    #[error("Check constraint violation")]
    CheckViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// The execution context was cancelled before the statement completed
    #[error("Operation cancelled")]
    Cancelled,

    /// The execution context deadline passed before the statement completed
    #[error("Operation timed out")]
    TimedOut,

    /// Catch-all for non-recoverable errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from sqlx::Error using proper sqlx error categorization
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => DbError::CheckViolation {
                constraint: db_err.constraint().map(|s| s.to_string()),
                table: db_err.table().map(|s| s.to_string()),
                message: db_err.message().to_string(),
            },
            // All other sqlx errors are non-recoverable - convert to anyhow with context
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Type alias for database operation results
pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::DbError;

    #[test]
    fn test_row_not_found_is_not_a_domain_error() {
        // Absence is reported as Ok(None) by the repository, so a stray RowNotFound is a fault
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Other(_)));
    }

    #[test]
    fn test_pool_timeout_is_other() {
        let err = DbError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DbError::Other(_)));
        assert!(err.to_string().contains("pool"));
    }
}
