//! Infrastructure layer: persistence backed by SQLite.

pub mod persistence;
