//! Persistent class-name → source-path cache, scoped to one project root.
//!
//! The cache is an explicit value: load it at the start of a resolution batch,
//! mutate it in memory, then [`ClassPathCache::flush`] it once at the end.
//! On disk it is a plain text file with one `qualified.Name=path` line per
//! entry, sorted by name.

use crate::names::QualifiedClassName;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default cache file name, relative to the project root.
pub const CACHE_FILE: &str = ".classlink";

/// Errors from reading or writing the cache file.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to read cache file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write cache file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// In-memory view of the on-disk class-path cache.
#[derive(Debug, Clone, Default)]
pub struct ClassPathCache {
    file: PathBuf,
    entries: BTreeMap<QualifiedClassName, PathBuf>,
    dirty: bool,
}

impl ClassPathCache {
    /// Empty cache that will persist to `file`.
    pub fn empty(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            entries: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Load the cache from `file`. A missing file yields an empty cache.
    ///
    /// Malformed lines are skipped. Entries pointing at paths that no longer
    /// exist are dropped, which marks the cache dirty so the next flush
    /// rewrites the file without them.
    pub fn load(file: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let mut cache = Self::empty(file);
        let content = match fs::read_to_string(&cache.file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(cache),
            Err(source) => {
                return Err(CacheError::Read {
                    path: cache.file,
                    source,
                });
            }
        };

        for line in content.lines() {
            let Some((name, path)) = line.trim().split_once('=') else {
                continue;
            };
            let Ok(name) = QualifiedClassName::new(name) else {
                continue;
            };
            let path = PathBuf::from(path);
            if path.exists() {
                cache.entries.insert(name, path);
            } else {
                tracing::debug!("dropping stale cache entry {} -> {}", name, path.display());
                cache.dirty = true;
            }
        }
        Ok(cache)
    }

    /// Load the cache, degrading to an empty one if the file cannot be read.
    pub fn load_or_empty(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        match Self::load(&file) {
            Ok(cache) => cache,
            Err(e) => {
                tracing::debug!("{e}; continuing without cached paths");
                Self::empty(file)
            }
        }
    }

    /// Path of the backing file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Whether the in-memory state differs from what was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw lookup without filesystem validation.
    pub fn get(&self, name: &QualifiedClassName) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Lookup that trusts an entry only if its path still exists. A stale
    /// entry is evicted and the cache marked dirty.
    pub fn lookup_valid(&mut self, name: &QualifiedClassName) -> Option<PathBuf> {
        let path = self.entries.get(name)?;
        if path.exists() {
            return Some(path.clone());
        }
        tracing::debug!("cached path for {} is gone: {}", name, path.display());
        self.entries.remove(name);
        self.dirty = true;
        None
    }

    /// Record a mapping. Marks the cache dirty only if the mapping changed.
    pub fn insert(&mut self, name: QualifiedClassName, path: PathBuf) {
        if self.entries.get(&name) != Some(&path) {
            self.entries.insert(name, path);
            self.dirty = true;
        }
    }

    /// Remove a mapping, returning the path it pointed at.
    pub fn remove(&mut self, name: &QualifiedClassName) -> Option<PathBuf> {
        let removed = self.entries.remove(name);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Iterate entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedClassName, &Path)> {
        self.entries.iter().map(|(k, v)| (k, v.as_path()))
    }

    /// Drop every entry whose path no longer exists.
    pub fn purge_stale(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, path| path.exists());
        let purged = before - self.entries.len();
        if purged > 0 {
            self.dirty = true;
        }
        purged
    }

    /// Render the on-disk representation.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (name, path) in &self.entries {
            out.push_str(name.as_str());
            out.push('=');
            out.push_str(&path.to_string_lossy());
            out.push('\n');
        }
        out
    }

    /// Write the cache to disk if it changed. Stale entries are purged first.
    ///
    /// Returns whether a write happened.
    pub fn flush(&mut self) -> Result<bool, CacheError> {
        if !self.dirty {
            return Ok(false);
        }
        self.purge_stale();
        fs::write(&self.file, self.to_text()).map_err(|source| CacheError::Write {
            path: self.file.clone(),
            source,
        })?;
        self.dirty = false;
        Ok(true)
    }
}
