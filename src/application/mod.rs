//! Application layer orchestrating the domain repository and alias generator.
//!
//! See [`services::UrlService`].

pub mod services;
