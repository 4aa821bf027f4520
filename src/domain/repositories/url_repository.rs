//! Repository trait for alias → URL storage.

use crate::error::StorageError;
use async_trait::async_trait;

/// Repository interface for alias → URL mappings.
///
/// Every operation is a single statement against the backing store; no
/// operation holds state between calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Stores `url` under `alias` and returns the new record id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConstraintViolation`] if the alias already
    /// exists. The existing record is left untouched.
    ///
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn save(&self, url: &str, alias: &str) -> Result<i64, StorageError>;

    /// Looks up the URL stored under `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record matches.
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn get(&self, alias: &str) -> Result<String, StorageError>;

    /// Removes the record for `alias` and returns the URL it pointed to.
    ///
    /// Removal and lookup happen in one statement, so two concurrent deletes
    /// of the same alias cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no record matches.
    /// Returns [`StorageError::Unavailable`] on database errors.
    async fn delete(&self, alias: &str) -> Result<String, StorageError>;
}
