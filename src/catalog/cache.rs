//! On-disk response cache with HTTP validator revalidation.
//!
//! Each URL gets two files keyed by its percent-encoded form: the raw body
//! and a small JSON sidecar holding the validators the server sent. The
//! sidecar is only present while the body next to it is complete.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validators stored alongside a cached body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
}

impl CacheEntry {
    /// Returns true if the server gave us anything to revalidate with.
    pub fn has_validators(&self) -> bool {
        self.etag.is_some() || self.last_modified.is_some()
    }
}

/// Directory-backed response cache.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Creates a cache rooted at `dir`. The directory is created on first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the per-user cache directory for this tool.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("aws-offers"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key(url: &str) -> String {
        urlencoding::encode(url).into_owned()
    }

    fn body_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.body", Self::key(url)))
    }

    fn meta_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.meta.json", Self::key(url)))
    }

    fn partial_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".partial");
        PathBuf::from(name)
    }

    /// Loads the validators for a URL without touching the body.
    ///
    /// Missing, unreadable or mismatched entries are a miss, as is an entry
    /// whose body file is gone.
    pub async fn load_entry(&self, url: &str) -> Option<CacheEntry> {
        let meta = tokio::fs::read_to_string(self.meta_path(url)).await.ok()?;
        let entry: CacheEntry = match serde_json::from_str(&meta) {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Ignoring corrupt cache metadata for {}: {}", url, e);
                return None;
            }
        };

        if entry.url != url {
            debug!("Cache key collision for {}, ignoring entry", url);
            return None;
        }

        if !tokio::fs::try_exists(self.body_path(url)).await.unwrap_or(false) {
            debug!("Cache body missing for {}", url);
            return None;
        }

        debug!("Cache hit for {}", url);
        Some(entry)
    }

    /// Reads the body stored for an entry.
    pub async fn load_body(&self, entry: &CacheEntry) -> Result<String> {
        let body_path = self.body_path(&entry.url);
        tokio::fs::read_to_string(&body_path)
            .await
            .with_context(|| format!("Failed to read cache file: {}", body_path.display()))
    }

    /// Stores a response body and its validators.
    ///
    /// The old sidecar is dropped before the body is replaced, and both
    /// files are renamed into place only once fully written.
    pub async fn store(&self, entry: &CacheEntry, body: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create cache directory: {}", self.dir.display()))?;

        let meta_path = self.meta_path(&entry.url);
        match tokio::fs::remove_file(&meta_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to invalidate cache file: {}", meta_path.display())
                })
            }
        }

        Self::write_file(&self.body_path(&entry.url), body.as_bytes()).await?;

        let meta = serde_json::to_vec(entry).context("Failed to encode cache metadata")?;
        Self::write_file(&meta_path, &meta).await?;

        debug!("Cached {} ({} bytes)", entry.url, body.len());
        Ok(())
    }

    async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
        let partial = Self::partial_path(path);
        tokio::fs::write(&partial, contents)
            .await
            .with_context(|| format!("Failed to write cache file: {}", partial.display()))?;
        tokio::fs::rename(&partial, path)
            .await
            .with_context(|| format!("Failed to write cache file: {}", path.display()))
    }
}
