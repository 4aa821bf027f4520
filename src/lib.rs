//! # URL Shortener (SQLite)
//!
//! The core of a URL shortening service: configuration loading, random alias
//! generation, and SQLite-backed alias → URL storage.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The URL record entity and the repository trait
//! - **Application Layer** ([`application`]) - Shorten / resolve / remove orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence
//! - **Utilities** ([`utils`]) - Alias generation and validation
//!
//! HTTP handling is left to the embedding service; [`error::StorageError`]
//! variants map directly onto 404 / retry / 500 responses.
//!
//! ## Quick Start
//!
//! ```bash
//! export CONFIG_PATH=./config/local.yaml
//! cargo run -- save https://example.com
//! cargo run -- get <alias>
//! ```
//!
//! ## Configuration
//!
//! Configuration is read from YAML with environment overrides via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::{AppError, StorageError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::UrlService;
    pub use crate::config::Config;
    pub use crate::domain::entities::UrlRecord;
    pub use crate::domain::repositories::UrlRepository;
    pub use crate::error::{AppError, StorageError};
    pub use crate::infrastructure::persistence::SqliteUrlRepository;
    pub use crate::state::AppState;
}
