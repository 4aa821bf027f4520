//! Domain layer: the URL record entity and the storage contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on SQLite; the repository trait is
//! implemented in [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
