//! # App Error Type
//!
//! Unified error type for page commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Command Function -> Result<T, AppError>                               │
//! │         │                                                               │
//! │         ├── Storage Error?  DbError::QueryFailed(..) ──────┐           │
//! │         ├── Domain Error?   CoreError::ProductNotFound ────┤           │
//! │         ├── Config Error?   ConfigError::Parse(..) ────────┤           │
//! │         │                                                  ▼           │
//! │         │                                          AppError {          │
//! │         │                                            code, message }   │
//! │         ▼                                                               │
//! │  Success                                                               │
//! │                                                                         │
//! │  A cancelled confirmation is NOT an error: the command returns         │
//! │  `None` / `RenameOutcome::Unchanged`.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockroom_core::CoreError;
use stockroom_db::DbError;

use crate::state::config::ConfigError;

/// Error returned from page commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 6f1c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or category id no longer exists
    NotFound,

    /// Input rejected (duplicate category name, unknown option)
    ValidationError,

    /// Storage operation failed
    DatabaseError,

    /// Stored data could not be decoded
    CorruptData,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Corrupt { key, reason } => {
                tracing::error!(key = %key, "Corrupt stored value: {}", reason);
                AppError::new(
                    ErrorCode::CorruptData,
                    format!("Stored '{}' could not be read: {}", key, reason),
                )
            }
            DbError::Serialization(e) => {
                tracing::error!("Serialization failed: {}", e);
                AppError::internal("Inventory could not be encoded")
            }
            DbError::ConnectionFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", id),
            CoreError::CategoryNotFound(id) => AppError::not_found("Category", id),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for page commands.
pub type AppResult<T> = Result<T, AppError>;
