//! Application services.
//!
//! - [`UrlService`] - Shorten, resolve and remove aliases

pub mod url_service;

pub use url_service::UrlService;
