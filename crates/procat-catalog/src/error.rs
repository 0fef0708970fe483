//! Catalog error taxonomy
//!
//! Three kinds reach callers:
//!
//! - [`ValidationError`]: malformed input, raised before any storage access
//! - [`PersistenceError`]: constraint violations, missing rows, driver failures
//! - [`CatalogError::ConcurrentModification`]: stale version on update
//!
//! Persistence and concurrency errors are surfaced unchanged; nothing in this
//! crate retries.

use procat_common::ParseEnumError;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for catalog operations
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Top-level error for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error(
        "Data processor {id} was modified concurrently: expected version {expected_version}, \
         found {actual_version}"
    )]
    ConcurrentModification {
        id: Uuid,
        expected_version: i64,
        actual_version: i64,
    },
}

impl CatalogError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::Persistence(PersistenceError::NotFound {
            entity,
            key: key.into(),
        })
    }

    /// Only validation errors can be fixed by the caller resubmitting corrected input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Persistence(PersistenceError::NotFound { .. }))
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(PersistenceError::from(err))
    }
}

/// Field-level validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Slug is required and cannot be empty")]
    SlugRequired,

    #[error("Slug must be between 1 and {max_length} characters")]
    SlugTooLong { max_length: usize },

    #[error("Slug can only contain lowercase letters, numbers, and hyphens")]
    SlugInvalidFormat,

    #[error("Slug cannot start or end with a hyphen")]
    SlugInvalidHyphenPlacement,

    #[error("Name is required and cannot be empty")]
    NameRequired,

    #[error("Name must be between 1 and {max_length} characters")]
    NameTooLong { max_length: usize },

    #[error("Either an id or a slug is required")]
    LookupKeyRequired,

    #[error("Command is required and cannot be empty")]
    CommandRequired,

    #[error("Description is {length} characters long, the maximum is {max_length}")]
    DescriptionTooLong { length: usize, max_length: usize },

    #[error("Parameter at position {position} has an empty name")]
    BlankParameterName { position: usize },

    #[error("Parameter name '{0}' is used more than once")]
    DuplicateParameterName(String),

    #[error("Output file at position {position} has an empty name")]
    BlankOutputFileName { position: usize },

    #[error("Parameter name at position {position} exceeds {max_length} characters")]
    ParameterNameTooLong { position: usize, max_length: usize },

    #[error("Output file name at position {position} exceeds {max_length} characters")]
    OutputFileNameTooLong { position: usize, max_length: usize },
}

/// Storage-level failures
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Unique constraint '{constraint}' violated")]
    UniqueViolation { constraint: String },

    #[error("Foreign key constraint '{constraint}' violated")]
    ForeignKeyViolation { constraint: String },

    #[error("{entity} '{key}' not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Stored row is unreadable: {0}")]
    CorruptRow(#[from] ParseEnumError),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for PersistenceError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            if db_err.is_unique_violation() {
                return Self::UniqueViolation { constraint };
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation { constraint };
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_only_validation_is_recoverable() {
        let validation = CatalogError::from(ValidationError::CommandRequired);
        assert!(validation.is_recoverable());

        let missing = CatalogError::not_found("Data processor", "abc");
        assert!(!missing.is_recoverable());
        assert!(missing.is_not_found());

        let stale = CatalogError::ConcurrentModification {
            id: Uuid::nil(),
            expected_version: 1,
            actual_version: 2,
        };
        assert!(!stale.is_recoverable());
    }

    #[test]
    fn test_non_database_sqlx_error_maps_to_database_variant() {
        let err = PersistenceError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, PersistenceError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_corrupt_row_message_names_the_value() {
        let err = PersistenceError::from(ParseEnumError::new("data type", "AUDIO"));
        assert_eq!(err.to_string(), "Stored row is unreadable: Invalid data type: 'AUDIO'");
    }

    #[test]
    fn test_description_error_message() {
        let err = ValidationError::DescriptionTooLong {
            length: 1025,
            max_length: 1024,
        };
        assert_eq!(
            err.to_string(),
            "Description is 1025 characters long, the maximum is 1024"
        );
    }
}
