//! Alias creation, resolution and removal service.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use url::Url;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::alias_generator::{generate_alias_with, validate_alias};

/// Generated aliases tried before giving up.
const MAX_ATTEMPTS: usize = 10;

/// Service composing the alias generator with URL storage.
///
/// The random source is injected so alias generation can be made
/// deterministic; the lock around it is only held while drawing an alias.
pub struct UrlService<R: UrlRepository, G = StdRng> {
    repository: Arc<R>,
    alias_length: usize,
    rng: Mutex<G>,
}

impl<R: UrlRepository> UrlService<R, StdRng> {
    /// Creates a service seeded from the operating system.
    pub fn new(repository: Arc<R>, alias_length: usize) -> Self {
        Self::with_rng(repository, alias_length, StdRng::from_os_rng())
    }
}

impl<R: UrlRepository, G: Rng + Send> UrlService<R, G> {
    /// Creates a service drawing aliases from `rng`.
    pub fn with_rng(repository: Arc<R>, alias_length: usize, rng: G) -> Self {
        Self {
            repository,
            alias_length,
            rng: Mutex::new(rng),
        }
    }

    /// Stores `url` under `alias`, or under a generated alias when none is given.
    ///
    /// # Alias Generation
    ///
    /// Generated aliases that collide with an existing record are regenerated,
    /// up to 10 attempts. A caller-provided alias is never replaced: a
    /// collision is returned as-is.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `url` is not an absolute http(s) URL
    /// - [`AppError::InvalidAlias`] if a custom alias fails validation
    /// - [`AppError::Storage`] with a constraint violation if a custom alias is taken
    /// - [`AppError::AliasSpaceExhausted`] if every generated alias collided
    pub async fn shorten(&self, url: &str, alias: Option<&str>) -> Result<UrlRecord, AppError> {
        validate_url(url)?;

        match alias {
            Some(alias) => {
                validate_alias(alias)?;
                let id = self.repository.save(url, alias).await?;
                tracing::info!(id, alias, "Url saved with custom alias");
                Ok(UrlRecord::new(id, alias, url))
            }
            None => self.save_with_generated_alias(url).await,
        }
    }

    /// Returns the URL stored under `alias`.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        let url = self.repository.get(alias).await?;
        tracing::debug!(alias, url = %url, "Alias resolved");
        Ok(url)
    }

    /// Deletes `alias` and returns the URL it pointed to.
    pub async fn remove(&self, alias: &str) -> Result<String, AppError> {
        let url = self.repository.delete(alias).await?;
        tracing::info!(alias, "Alias removed");
        Ok(url)
    }

    async fn save_with_generated_alias(&self, url: &str) -> Result<UrlRecord, AppError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let alias = {
                let mut rng = self.rng.lock().await;
                generate_alias_with(&mut *rng, self.alias_length)
            };

            match self.repository.save(url, &alias).await {
                Ok(id) => {
                    tracing::info!(id, alias = %alias, attempt, "Url saved");
                    return Ok(UrlRecord::new(id, alias, url));
                }
                Err(e) if e.is_constraint_violation() => {
                    tracing::warn!(alias = %alias, attempt, "Alias collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::AliasSpaceExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }
}

fn validate_url(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(())
}
