//! Tracing subscriber setup.
//!
//! The deployment environment picks the output format and default level:
//!
//! | env     | format | default level |
//! |---------|--------|---------------|
//! | `local` | text   | `debug`       |
//! | `dev`   | json   | `debug`       |
//! | `prod`  | json   | `info`        |
//!
//! `RUST_LOG` overrides the default level. Logs go to stderr so command output
//! on stdout stays machine-readable.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default filter directive for `env`.
pub fn default_directive(env: Environment) -> &'static str {
    match env {
        Environment::Local | Environment::Dev => "debug",
        Environment::Prod => "info",
    }
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(env: Environment) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(env)));

    let registry = tracing_subscriber::registry().with(env_filter);

    match env {
        Environment::Local => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        Environment::Dev | Environment::Prod => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}
