//! Page cache for storing puzzle inputs and descriptions locally

use crate::calendar::PuzzleDate;
use crate::error::CacheError;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based cache of one kind of page
///
/// Directory structure: `{dir}/{year}_day{day:02}.txt`
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    /// Create a cache rooted at `dir`; nothing is created until the first `put`
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Cache for puzzle inputs under `{cache_dir}/inputs`
    pub fn inputs(cache_dir: &Path) -> Self {
        Self::new(cache_dir.join("inputs"))
    }

    /// Cache for extracted puzzle descriptions under `{cache_dir}/problems`
    pub fn problems(cache_dir: &Path) -> Self {
        Self::new(cache_dir.join("problems"))
    }

    /// Get the cache path for a specific puzzle
    pub fn cache_path(&self, date: PuzzleDate) -> PathBuf {
        self.dir.join(format!("{}_day{:02}.txt", date.year, date.day))
    }

    /// Get the cached page or None if not cached
    pub fn get(&self, date: PuzzleDate) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(date);
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            tracing::debug!(path = %path.display(), "cache hit");
            Ok(Some(content))
        } else {
            tracing::debug!(path = %path.display(), "cache miss");
            Ok(None)
        }
    }

    /// Store a page, replacing any previous copy
    pub fn put(&self, date: PuzzleDate, content: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            CacheError::DirCreation(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        fs::write(self.cache_path(date), content)?;
        Ok(())
    }
}
