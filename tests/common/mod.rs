#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;
use url_shortener_sqlite::infrastructure::persistence::SqliteUrlRepository;

/// Repository backed by a fresh database file that lives as long as the value.
pub struct TestStorage {
    pub repo: SqliteUrlRepository,
    pub path: PathBuf,
    _dir: TempDir,
}

pub async fn setup_storage() -> TestStorage {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.db");
    let repo = SqliteUrlRepository::connect(&path).await.unwrap();

    TestStorage {
        repo,
        path,
        _dir: dir,
    }
}

pub async fn count_urls(repo: &SqliteUrlRepository) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url")
        .fetch_one(repo.pool())
        .await
        .unwrap()
}

pub async fn insert_url(repo: &SqliteUrlRepository, alias: &str, url: &str) {
    sqlx::query("INSERT INTO url (alias, url) VALUES (?, ?)")
        .bind(alias)
        .bind(url)
        .execute(repo.pool())
        .await
        .unwrap();
}
