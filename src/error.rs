//! Error types shared across the storage and service layers.
//!
//! Storage errors carry the identifier of the operation that produced them
//! (`storage.sqlite.save`, `storage.sqlite.get`, ...) so a failure can be traced
//! back to a single statement.
//!
//! # Mapping for callers
//!
//! | Error                                 | Typical HTTP translation   |
//! |---------------------------------------|----------------------------|
//! | [`StorageError::NotFound`]            | 404                        |
//! | [`StorageError::ConstraintViolation`] | retry with a new alias     |
//! | [`StorageError::Unavailable`]         | 500                        |

use thiserror::Error;

/// Failure of a single storage operation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No record exists for the alias.
    #[error("{op}: url not found for alias '{alias}'")]
    NotFound { op: &'static str, alias: String },

    /// The alias is already taken.
    #[error("{op}: alias '{alias}' already exists")]
    ConstraintViolation { op: &'static str, alias: String },

    /// Opening, preparing or executing a statement failed.
    #[error("{op}: {source}")]
    Unavailable {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StorageError {
    pub fn unavailable(op: &'static str, source: sqlx::Error) -> Self {
        Self::Unavailable { op, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

/// Maps a driver error raised while writing `alias` into a [`StorageError`].
///
/// Unique violations become [`StorageError::ConstraintViolation`]; anything
/// else is reported as [`StorageError::Unavailable`].
pub fn map_sqlx_error(op: &'static str, alias: &str, e: sqlx::Error) -> StorageError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return StorageError::ConstraintViolation {
            op,
            alias: alias.to_string(),
        };
    }

    StorageError::unavailable(op, e)
}

/// Errors returned by [`crate::application::services::UrlService`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid alias '{alias}': {reason}")]
    InvalidAlias { alias: String, reason: &'static str },

    /// Every generated alias collided with an existing one.
    #[error("failed to generate a unique alias after {attempts} attempts")]
    AliasSpaceExhausted { attempts: usize },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }
}
