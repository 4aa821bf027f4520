//! Startup composition of storage and services.

use std::sync::Arc;

use crate::application::services::UrlService;
use crate::config::Config;
use crate::error::StorageError;
use crate::infrastructure::persistence::SqliteUrlRepository;

/// Shared handles built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<SqliteUrlRepository>,
    pub url_service: Arc<UrlService<SqliteUrlRepository>>,
}

impl AppState {
    /// Opens storage at `config.storage_path` and wires the URL service.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if storage cannot be initialized.
    pub async fn build(config: &Config) -> Result<Self, StorageError> {
        let repository = Arc::new(SqliteUrlRepository::connect(&config.storage_path).await?);
        let url_service = Arc::new(UrlService::new(repository.clone(), config.alias_length));

        Ok(Self {
            repository,
            url_service,
        })
    }
}
