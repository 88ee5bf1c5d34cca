//! Command-line interface parsing for postpeek
//!
//! This module handles parsing of CLI arguments using clap, including an
//! optional post link to fetch immediately on startup and a flag to clear
//! the local post cache.

use clap::Parser;
use thiserror::Error;

use crate::data::extract_post_id;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The given link does not contain a post id
    #[error("Invalid post link: '{0}'. Expected https://x.com/user/status/<id> or a bare numeric id")]
    InvalidLink(String),
}

/// postpeek - Fetch and inspect X post details from the terminal
#[derive(Parser, Debug)]
#[command(name = "postpeek")]
#[command(about = "Fetch X post details with local caching and quota tracking")]
#[command(version)]
pub struct Cli {
    /// Post link or bare id to fetch immediately on startup
    ///
    /// Examples:
    ///   postpeek                                    # Open the input prompt
    ///   postpeek https://x.com/alice/status/42      # Fetch this post right away
    ///   postpeek 42                                 # Same, by bare id
    #[arg(value_name = "LINK")]
    pub link: Option<String>,

    /// Remove all cached posts before starting
    #[arg(long)]
    pub clear_cache: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Link to fetch immediately after startup, already validated
    pub initial_link: Option<String>,
    /// Whether to clear the post cache before starting
    pub clear_cache: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the link does not contain a post id
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if let Some(link) = &cli.link {
            // Validate up front so a typo fails before the TUI starts
            extract_post_id(link).ok_or_else(|| CliError::InvalidLink(link.clone()))?;
        }

        Ok(StartupConfig {
            initial_link: cli.link.clone(),
            clear_cache: cli.clear_cache,
        })
    }
}
