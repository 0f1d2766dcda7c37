//! Error types for the hikelog core.
//!
//! Every storage, query and aggregation operation returns [`Result`], whose
//! error side is [`HikeError`]. SQLite failures are classified on conversion so
//! callers can tell an unavailable store from a broken constraint without
//! inspecting driver codes themselves.

use rusqlite::ErrorCode;
use thiserror::Error;

/// All errors that can occur within the hikelog core.
#[derive(Debug, Error)]
pub enum HikeError {
    /// The store is closed or could not be opened, read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A foreign-key or uniqueness rule rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A lookup by id matched no row.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Advanced search bounds were inverted.
    #[error("Invalid length range: minimum {min} km is greater than maximum {max} km")]
    InvalidRange { min: f64, max: f64 },

    /// A single record could not be parsed during aggregation.
    #[error("Skipped hike {hike_id}: cannot parse {field} '{value}'")]
    ParseSkip {
        hike_id: i64,
        field: &'static str,
        value: String,
    },

    /// Caller-side input checks failed before reaching the store.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Any other SQLite failure.
    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration data could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`HikeError`].
pub type Result<T> = std::result::Result<T, HikeError>;

impl From<rusqlite::Error> for HikeError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, message) => {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                match failure.code {
                    ErrorCode::ConstraintViolation => HikeError::ConstraintViolation(detail),
                    ErrorCode::CannotOpen
                    | ErrorCode::NotADatabase
                    | ErrorCode::DatabaseCorrupt
                    | ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::ReadOnly
                    | ErrorCode::SystemIoFailure
                    | ErrorCode::DiskFull
                    | ErrorCode::PermissionDenied => HikeError::StorageUnavailable(detail),
                    _ => HikeError::Database(err),
                }
            }
            _ => HikeError::Database(err),
        }
    }
}

impl HikeError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::StorageUnavailable(_) => "The hike journal is not available right now".to_string(),
            Self::ConstraintViolation(_) => "That change conflicts with existing data (does the hike still exist?)".to_string(),
            Self::NotFound { entity, id } => format!("{entity} #{id} no longer exists"),
            Self::InvalidRange { .. } => "Minimum length cannot be greater than maximum length".to_string(),
            Self::ParseSkip { hike_id, .. } => format!("Hike #{hike_id} has an unreadable date"),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::Database(_) => "Failed to save changes".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Settings format error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_failure(code: std::os::raw::c_int, message: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(code), Some(message.to_string()))
    }

    #[test]
    fn test_foreign_key_failure_is_constraint_violation() {
        let err: HikeError = sqlite_failure(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY, "FOREIGN KEY constraint failed").into();
        assert!(matches!(err, HikeError::ConstraintViolation(ref msg) if msg.contains("FOREIGN KEY")));
    }

    #[test]
    fn test_cannot_open_is_storage_unavailable() {
        let err: HikeError = sqlite_failure(rusqlite::ffi::SQLITE_CANTOPEN, "unable to open database file").into();
        assert!(matches!(err, HikeError::StorageUnavailable(_)));
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        let err: HikeError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, HikeError::Database(_)));
    }

    #[test]
    fn test_user_message_hides_driver_detail() {
        let err = HikeError::StorageUnavailable("disk I/O error at page 42".to_string());
        assert!(!err.user_message().contains("page 42"));

        let err = HikeError::NotFound { entity: "Hike", id: 7 };
        assert_eq!(err.user_message(), "Hike #7 no longer exists");
    }
}
