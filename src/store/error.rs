use std::fmt;

/// Result type for quote store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error types for quote store operations
#[derive(Debug)]
pub enum StoreError {
    /// Connection string or pool settings are unusable
    ConfigError(String),

    /// Database unreachable or authentication failure
    ConnectionError(String),

    /// SQL errors, constraint violations, unexpected row shapes
    DatabaseError(String),

    /// Connection pool issues
    PoolError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            StoreError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            StoreError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            StoreError::PoolError(msg) => write!(f, "Pool error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            return StoreError::DatabaseError(format!(
                "{}: {}",
                db_error.code().code(),
                db_error.message()
            ));
        }

        if err.is_closed() {
            return StoreError::ConnectionError(err.to_string());
        }

        StoreError::DatabaseError(format!("{:?}", err))
    }
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::PoolError(err.to_string())
    }
}

impl From<deadpool_postgres::BuildError> for StoreError {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        StoreError::ConnectionError(err.to_string())
    }
}
