//! Command-line front-end for the alias storage.
//!
//! Exercises the storage operations directly, without an HTTP layer.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL with a generated alias
//! url-shortener-sqlite save https://example.com
//!
//! # Shorten with a custom alias
//! url-shortener-sqlite save https://example.com --alias ex1
//!
//! # Resolve an alias
//! url-shortener-sqlite get ex1
//!
//! # Delete an alias (asks for confirmation unless -y)
//! url-shortener-sqlite delete ex1
//!
//! # Show configuration and check storage
//! url-shortener-sqlite check
//! ```
//!
//! # Environment Variables
//!
//! - `CONFIG_PATH`: YAML config file (default: `./config/local.yaml`)
//! - `HTTP_SERVER_PASSWORD`: overrides `http_server.password`
//! - `RUST_LOG`: overrides the log level

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

use url_shortener_sqlite::AppState;
use url_shortener_sqlite::config::{CONFIG_PATH_ENV, Config, DEFAULT_CONFIG_PATH};
use url_shortener_sqlite::telemetry;

/// URL shortener storage tool.
#[derive(Parser)]
#[command(name = "url-shortener-sqlite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a URL under a custom or generated alias
    Save {
        /// Absolute http(s) URL
        url: String,

        /// Custom alias (generated if not provided)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Print the URL stored under an alias
    Get { alias: String },

    /// Delete an alias
    Delete {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show configuration and check storage
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    telemetry::init(config.env).context("Failed to initialize logging")?;

    let state = AppState::build(&config)
        .await
        .context("Failed to initialize storage")?;

    let result = match cli.command {
        Commands::Save { url, alias } => save(&state, &url, alias.as_deref()).await,
        Commands::Get { alias } => get(&state, &alias).await,
        Commands::Delete { alias, yes } => delete(&state, &alias, yes).await,
        Commands::Check => check(&state, &config).await,
    };

    state.repository.close().await;
    result
}

async fn save(state: &AppState, url: &str, alias: Option<&str>) -> Result<()> {
    let record = state
        .url_service
        .shorten(url, alias)
        .await
        .context("Failed to save url")?;

    println!("{}", "✅ Saved".green().bold());
    println!("  Alias: {}", record.alias.bright_yellow().bold());
    println!("  URL:   {}", record.url.cyan());
    println!("  ID:    {}", record.id.to_string().bright_black());

    Ok(())
}

async fn get(state: &AppState, alias: &str) -> Result<()> {
    let url = state
        .url_service
        .resolve(alias)
        .await
        .with_context(|| format!("Failed to resolve '{}'", alias))?;

    println!("{}", url);
    Ok(())
}

/// Deletes an alias after confirmation.
///
/// The confirmation default is No.
async fn delete(state: &AppState, alias: &str, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete alias '{}'?", alias))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let url = state
        .url_service
        .remove(alias)
        .await
        .with_context(|| format!("Failed to delete '{}'", alias))?;

    println!("{}", "✅ Deleted".green().bold());
    println!("  Alias: {}", alias.bright_yellow());
    println!("  URL:   {}", url.cyan());

    Ok(())
}

async fn check(state: &AppState, config: &Config) -> Result<()> {
    config.summary();

    println!("{}", "🔍 Checking storage...".bright_blue());
    state.repository.ping().await?;
    println!(
        "{} {}",
        "✅ Storage OK:".green().bold(),
        config.storage_path.display()
    );

    Ok(())
}
