//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `SHORT_ID_SECRET` - Key for the question/user short-ID permutation
//! - `TOKEN_SIGNING_SECRET` - HMAC key used to verify bearer credentials
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SHORT_ID_DECODE_POLICY` - `strict` or `passthrough` (default: `strict`)
//!
//! ```bash
//! export SHORT_ID_SECRET="change-me"
//! export TOKEN_SIGNING_SECRET="change-me-too"
//! export SHORT_ID_DECODE_POLICY="passthrough"  # accept raw numeric IDs during migration
//! ```

use anyhow::{Context, Result};
use std::env;

use crate::utils::short_id::DecodePolicy;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Key for the short-ID codec. Changing it invalidates every issued token.
    pub short_id_secret: String,
    /// Whether decoding falls back to raw numeric IDs.
    pub short_id_decode_policy: DecodePolicy,
    /// HMAC signing secret used to verify bearer credentials.
    /// Loaded from `TOKEN_SIGNING_SECRET`. Must be non-empty.
    pub token_signing_secret: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required secret is missing or the decode policy
    /// is not recognised.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let short_id_secret =
            env::var("SHORT_ID_SECRET").context("SHORT_ID_SECRET must be set")?;

        let short_id_decode_policy = match env::var("SHORT_ID_DECODE_POLICY") {
            Ok(value) => value
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid SHORT_ID_DECODE_POLICY")?,
            Err(_) => DecodePolicy::default(),
        };

        let token_signing_secret =
            env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            short_id_secret,
            short_id_decode_policy,
            token_signing_secret,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - either secret is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.short_id_secret.is_empty() {
            anyhow::bail!("SHORT_ID_SECRET must not be empty");
        }

        if self.token_signing_secret.is_empty() {
            anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Short ID secret: {}", mask_secret(&self.short_id_secret));
        tracing::info!("  Short ID decode policy: {}", self.short_id_decode_policy);
        tracing::info!(
            "  Token signing secret: {}",
            mask_secret(&self.token_signing_secret)
        );
    }
}

/// Masks a secret for logging, keeping only its length visible.
///
/// - `""` → `<empty>`
/// - `"hunter2"` → `*** (7 chars)`
fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<empty>".to_string();
    }
    format!("*** ({} chars)", secret.chars().count())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
