//! CLI administration tool for question-api.
//!
//! Translates between internal IDs and the short tokens clients see, and
//! checks the service configuration without starting the server.
//!
//! # Usage
//!
//! ```bash
//! # Encode an internal ID
//! cargo run --bin admin -- id encode 42
//!
//! # Decode a token back to its internal ID
//! cargo run --bin admin -- id decode Xb3k9QaZr0M
//!
//! # Validate environment configuration
//! cargo run --bin admin -- config check
//! ```
//!
//! # Environment Variables
//!
//! - `SHORT_ID_SECRET` (required): key for the short-ID codec
//! - `SHORT_ID_DECODE_POLICY` (optional): `strict` or `passthrough`
//! - `TOKEN_SIGNING_SECRET` (required for `config check`)

use question_api::config::{self, Config};
use question_api::utils::short_id::{DecodePolicy, ShortIdCodec};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing question-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Translate between internal IDs and short tokens
    Id {
        #[command(subcommand)]
        action: IdAction,
    },

    /// Configuration tools
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Short-ID subcommands.
#[derive(Subcommand)]
enum IdAction {
    /// Encode an internal ID as a short token
    Encode {
        /// Internal numeric ID
        id: u64,
    },

    /// Decode a short token into its internal ID
    Decode {
        /// Token as seen by clients
        token: String,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration from the environment
    Check,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Id { action } => handle_id_action(action)?,
        Commands::Config { action } => handle_config_action(action)?,
    }

    Ok(())
}

/// Builds the codec from `SHORT_ID_SECRET` and `SHORT_ID_DECODE_POLICY`.
fn codec_from_env() -> Result<ShortIdCodec> {
    let secret = std::env::var("SHORT_ID_SECRET").context("SHORT_ID_SECRET must be set")?;

    let policy = match std::env::var("SHORT_ID_DECODE_POLICY") {
        Ok(value) => value.parse().map_err(anyhow::Error::msg)?,
        Err(_) => DecodePolicy::default(),
    };

    Ok(ShortIdCodec::new(&secret, policy))
}

/// Dispatches short-ID commands.
fn handle_id_action(action: IdAction) -> Result<()> {
    let codec = codec_from_env()?;

    match action {
        IdAction::Encode { id } => {
            let token = codec.encode(id);
            println!("  {} {}", "ID:   ".bright_black(), id.to_string().cyan());
            println!("  {} {}", "Token:".bright_black(), token.bright_yellow().bold());
        }
        IdAction::Decode { token } => match codec.decode(&token) {
            Ok(id) => {
                println!("  {} {}", "Token:".bright_black(), token.cyan());
                println!(
                    "  {} {}",
                    "ID:   ".bright_black(),
                    id.to_string().bright_yellow().bold()
                );
            }
            Err(e) => {
                println!("{} {}", "Invalid token:".red().bold(), e);
                println!(
                    "  {} {}",
                    "Policy:".bright_black(),
                    codec.policy().to_string().yellow()
                );
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Dispatches configuration commands.
fn handle_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check => check_config(),
    }
}

/// Loads and validates the configuration, printing a masked summary.
fn check_config() -> Result<()> {
    println!("{}", "Configuration check".bright_blue().bold());
    println!();

    let config: Config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{} {:#}", "Invalid configuration:".red().bold(), e);
            std::process::exit(1);
        }
    };

    println!("  {:<24} {}", "Listen address".bright_white(), config.listen_addr.cyan());
    println!("  {:<24} {}", "Log level".bright_white(), config.log_level.cyan());
    println!("  {:<24} {}", "Log format".bright_white(), config.log_format.cyan());
    println!(
        "  {:<24} {}",
        "Short ID decode policy".bright_white(),
        config.short_id_decode_policy.to_string().cyan()
    );
    println!(
        "  {:<24} {}",
        "Short ID secret".bright_white(),
        "set".green()
    );
    println!(
        "  {:<24} {}",
        "Token signing secret".bright_white(),
        "set".green()
    );
    println!();
    println!("{}", "Configuration is valid".green().bold());

    Ok(())
}
