//! Stored session cookie with the time it was saved

use crate::error::CacheError;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Session cookie file plus a sibling RFC 3339 timestamp file
pub struct CookieStore {
    cookie_path: PathBuf,
    timestamp_path: PathBuf,
}

impl CookieStore {
    /// Store under `{cache_dir}/cookie` and `{cache_dir}/cookie_timestamp`
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            cookie_path: cache_dir.join("cookie"),
            timestamp_path: cache_dir.join("cookie_timestamp"),
        }
    }

    pub fn cookie_path(&self) -> &Path {
        &self.cookie_path
    }

    /// The stored session, `None` when missing or blank
    pub fn load(&self) -> Result<Option<Zeroizing<String>>, CacheError> {
        if !self.cookie_path.exists() {
            return Ok(None);
        }

        let content = Zeroizing::new(fs::read_to_string(&self.cookie_path)?);
        let session = content.trim();
        if session.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Zeroizing::new(session.to_owned())))
        }
    }

    /// Write the session and the time it was saved
    pub fn save(&self, session: &str, saved_at: DateTime<Utc>) -> Result<(), CacheError> {
        if let Some(dir) = self.cookie_path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                CacheError::DirCreation(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        write_private(&self.cookie_path, session.trim())?;
        write_private(&self.timestamp_path, &saved_at.to_rfc3339())?;
        tracing::debug!(path = %self.cookie_path.display(), "session cookie stored");
        Ok(())
    }

    /// When the cookie was saved; `None` if unknown or unreadable
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>, CacheError> {
        if !self.timestamp_path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.timestamp_path)?;
        Ok(DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)))
    }
}

/// Create or truncate `path`, readable by the owner only on Unix
fn write_private(path: &Path, contents: &str) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())
}
