//! SQLite repository implementation.
//!
//! Concrete implementation of [`crate::domain::repositories::UrlRepository`]
//! using SQLx with bound parameters.

pub mod schema;
pub mod sqlite_url_repository;

pub use sqlite_url_repository::SqliteUrlRepository;
