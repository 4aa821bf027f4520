//! SQL DDL for the alias storage.

/// SQLite schema:
/// - `id` INTEGER PRIMARY KEY (rowid alias, auto-assigned)
/// - `alias` unique and non-null
/// - `idx_alias` kept explicitly alongside the implicit UNIQUE index
///
/// Every statement is idempotent, so the DDL can run against an existing file.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS url (
    id INTEGER PRIMARY KEY,
    alias TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_alias ON url(alias);
"#;

/// Splits [`SQLITE_INIT`] into individual statements.
///
/// `sqlx::query` executes one statement at a time.
pub fn statements() -> impl Iterator<Item = &'static str> {
    SQLITE_INIT
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
