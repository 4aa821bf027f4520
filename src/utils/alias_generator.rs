//! Alias generation and validation utilities.
//!
//! Generated aliases are drawn uniformly from a 62-symbol alphanumeric
//! alphabet. Nothing here guarantees uniqueness; the storage layer's UNIQUE
//! constraint does, and callers retry on conflict.

use crate::error::AppError;
use rand::Rng;

/// Symbols an alias may contain: `A-Z`, `a-z`, `0-9`.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Longest alias accepted from callers.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Generates a random alias of exactly `length` characters using the
/// thread-local generator.
///
/// # Examples
///
/// ```
/// use url_shortener_sqlite::utils::alias_generator::generate_alias;
///
/// let alias = generate_alias(6);
/// assert_eq!(alias.len(), 6);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> String {
    generate_alias_with(&mut rand::rng(), length)
}

/// Generates a random alias from an injected random source.
///
/// A seeded generator makes the output reproducible. `length == 0` yields an
/// empty string.
pub fn generate_alias_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Validates a caller-provided alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters and digits
///
/// # Errors
///
/// Returns [`AppError::InvalidAlias`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::InvalidAlias {
            alias: alias.to_string(),
            reason: "alias must be 1-64 characters",
        });
    }

    if !alias.bytes().all(|b| ALPHABET.contains(&b)) {
        return Err(AppError::InvalidAlias {
            alias: alias.to_string(),
            reason: "alias can only contain ASCII letters and digits",
        });
    }

    Ok(())
}
