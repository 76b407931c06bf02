//! Error types for the CLI

use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache error
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aocli_client::AocError),

    /// No session cookie in the environment or the cookie file
    #[error("No session cookie configured; set AOC_SESSION or run `aocli update-cookie`")]
    MissingSession,

    /// The server rejected the session cookie
    #[error("Invalid session: the server did not accept the cookie")]
    InvalidSession,

    /// The puzzle has not been released (or never will be)
    #[error("Problem not available yet (Year: {year}, Day: {day})")]
    Unavailable { year: u16, day: u8 },

    /// Some days of a batch fetch failed
    #[error("Failed to fetch {failed} of {total} input(s)")]
    BatchFetch { failed: usize, total: usize },
}

/// Cache-specific errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache directory creation failed
    #[error("Cache directory creation failed: {0}")]
    DirCreation(String),
}
