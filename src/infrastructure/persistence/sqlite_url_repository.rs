//! SQLite implementation of the URL repository.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use super::schema;
use crate::domain::repositories::UrlRepository;
use crate::error::{StorageError, map_sqlx_error};

const MAX_CONNECTIONS: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite repository owning the connection pool and the `url` table.
///
/// The pool is safe to share between tasks; SQLite serializes writers.
#[derive(Clone)]
pub struct SqliteUrlRepository {
    pool: SqlitePool,
}

impl SqliteUrlRepository {
    /// Opens (creating if needed) the database at `path` and ensures the schema.
    ///
    /// Missing parent directories are created. Safe to call against a file that
    /// is already initialized.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the file cannot be opened or
    /// any schema statement fails.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        const OP: &str = "storage.sqlite.new";

        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::unavailable(OP, sqlx::Error::Io(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::unavailable(OP, e))?;

        tracing::info!(path = %path.display(), "Connected to storage");

        let repository = Self::from_pool(pool);
        repository.init_schema().await?;
        Ok(repository)
    }

    /// Wraps an existing pool without touching the schema.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Executes the bundled DDL statement by statement.
    pub async fn init_schema(&self) -> Result<(), StorageError> {
        const OP: &str = "storage.sqlite.init_schema";

        for stmt in schema::statements() {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::unavailable(OP, e))?;
        }

        tracing::debug!("Schema ensured");
        Ok(())
    }

    /// Round-trips a trivial query to check the database is reachable.
    pub async fn ping(&self) -> Result<(), StorageError> {
        const OP: &str = "storage.sqlite.ping";

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::unavailable(OP, e))?;
        Ok(())
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn save(&self, url: &str, alias: &str) -> Result<i64, StorageError> {
        const OP: &str = "storage.sqlite.save";

        let result = sqlx::query("INSERT INTO url (url, alias) VALUES (?, ?)")
            .bind(url)
            .bind(alias)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(OP, alias, e))?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, alias, "Saved url");
        Ok(id)
    }

    async fn get(&self, alias: &str) -> Result<String, StorageError> {
        const OP: &str = "storage.sqlite.get";

        sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::unavailable(OP, e))?
            .ok_or_else(|| StorageError::NotFound {
                op: OP,
                alias: alias.to_string(),
            })
    }

    async fn delete(&self, alias: &str) -> Result<String, StorageError> {
        const OP: &str = "storage.sqlite.delete";

        let url = sqlx::query_scalar::<_, String>("DELETE FROM url WHERE alias = ? RETURNING url")
            .bind(alias)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::unavailable(OP, e))?
            .ok_or_else(|| StorageError::NotFound {
                op: OP,
                alias: alias.to_string(),
            })?;

        tracing::debug!(alias, "Deleted url");
        Ok(url)
    }
}
