//! Configuration resolution from CLI args and the environment

use crate::cli::Args;
use crate::cookie::CookieStore;
use crate::error::CliError;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable holding the session cookie
pub const SESSION_ENV: &str = "AOC_SESSION";

/// Where the session cookie came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// `AOC_SESSION`
    Environment,
    /// The stored cookie file
    CookieFile,
    /// Nothing configured
    Missing,
}

/// Resolved runtime configuration
pub struct Config {
    /// Cache directory path
    pub cache_dir: PathBuf,
    /// Session key (zeroized on drop, empty when missing)
    pub session: Zeroizing<String>,
    /// Where `session` came from
    pub session_source: SessionSource,
}

impl Config {
    /// Build config from CLI args, resolving the session
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        let cache_dir = expand_tilde(&args.cache_dir);
        let env_session = std::env::var(SESSION_ENV).ok().map(Zeroizing::new);
        let (session, session_source) =
            resolve_session(env_session, &CookieStore::new(&cache_dir))?;

        Ok(Config {
            cache_dir,
            session,
            session_source,
        })
    }

    /// The session, or `CliError::MissingSession` when none is configured
    pub fn require_session(&self) -> Result<&str, CliError> {
        if self.session.is_empty() {
            Err(CliError::MissingSession)
        } else {
            Ok(self.session.as_str())
        }
    }

    pub fn cookie_store(&self) -> CookieStore {
        CookieStore::new(&self.cache_dir)
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Environment first, then the stored cookie
fn resolve_session(
    env_session: Option<Zeroizing<String>>,
    store: &CookieStore,
) -> Result<(Zeroizing<String>, SessionSource), CliError> {
    if let Some(session) = env_session.filter(|s| !s.trim().is_empty()) {
        return Ok((Zeroizing::new(session.trim().to_owned()), SessionSource::Environment));
    }

    match store.load()? {
        Some(session) => Ok((session, SessionSource::CookieFile)),
        None => Ok((Zeroizing::new(String::new()), SessionSource::Missing)),
    }
}

/// Prompt user for session token
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    println!("{}", reason);
    let s = Zeroizing::new(
        rpassword::prompt_password("Enter AOC session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {}", e)))?,
    );
    let session = s.trim();
    if session.is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(Zeroizing::new(session.to_owned()))
}
