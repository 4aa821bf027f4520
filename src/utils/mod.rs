//! Helper functions used across the crate.
//!
//! - [`alias_generator`] - Random alias generation and alias validation

pub mod alias_generator;
