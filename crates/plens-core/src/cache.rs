//! # Dataset Cache
//!
//! Display layers re-read the dataset on every interaction. [`DatasetCache`]
//! keeps the parsed tree keyed by path and file modification time, so the
//! file is only parsed again after it changes on disk.
//!
//! Meant for long-running display layers that serve many requests from one
//! process. One-shot commands such as `plens compare` load once through
//! [`crate::load_or_empty`] and have nothing to reuse. The loader and the
//! validator never cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde_json::Value;

use crate::error::LoadError;
use crate::loader::load_dataset;

#[derive(Debug)]
struct CacheEntry {
    modified: SystemTime,
    dataset: Arc<Value>,
}

/// Parsed datasets keyed by path, invalidated when the file's mtime changes.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl DatasetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the dataset at `path`, parsing it only if it is not cached or
    /// its modification time differs from the cached one.
    ///
    /// Failures are never cached: a failed load drops any stale entry for
    /// `path` and the next call tries again.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of the underlying load.
    pub fn get(&mut self, path: impl AsRef<Path>) -> Result<Arc<Value>, LoadError> {
        let path = path.as_ref();

        let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => {
                self.entries.remove(path);
                // Let the loader classify the failure.
                return load_dataset(path).map(Arc::new);
            }
        };

        if let Some(entry) = self.entries.get(path) {
            if entry.modified == modified {
                tracing::trace!(path = %path.display(), "dataset cache hit");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        tracing::debug!(path = %path.display(), "dataset cache miss, loading");
        let dataset = match load_dataset(path) {
            Ok(dataset) => Arc::new(dataset),
            Err(err) => {
                self.entries.remove(path);
                return Err(err);
            }
        };

        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }

    /// Drop the cached entry for `path`, if any.
    pub fn invalidate(&mut self, path: impl AsRef<Path>) {
        self.entries.remove(path.as_ref());
    }

    /// Number of cached datasets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
