//! Map qualified class names to source files.
//!
//! Each call to [`Resolver::find_class_paths`] is one batch: the class-path
//! cache is loaded, consulted and updated in memory, then flushed once if it
//! changed. Cached paths are always re-checked against the filesystem before
//! being returned.

use crate::roots::{WalkOptions, build_exclude_set, discover_source_roots};
use anyhow::{Context, Result};
use classlink_core::cache::{CACHE_FILE, ClassPathCache};
use classlink_core::config::ClasslinkConfig;
use classlink_core::names::QualifiedClassName;
use std::path::{Path, PathBuf};

/// Resolves class names to files under one project root.
#[derive(Debug, Clone)]
pub struct Resolver {
    project_root: PathBuf,
    cache_file: PathBuf,
    walk: WalkOptions,
}

/// Outcome of resolving a single name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Served from a cache entry whose file still exists.
    Cached(PathBuf),
    /// Located by searching the source roots.
    Found(PathBuf),
    /// No source root contains the class.
    Missing,
}

impl Resolution {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Cached(p) | Self::Found(p) => Some(p.as_path()),
            Self::Missing => None,
        }
    }
}

impl Resolver {
    /// Resolver with default settings: cache at `<root>/.classlink`, no
    /// excluded directories.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            cache_file: project_root.join(CACHE_FILE),
            project_root,
            walk: WalkOptions::default(),
        }
    }

    /// Resolver configured from a loaded [`ClasslinkConfig`].
    pub fn from_config(project_root: impl Into<PathBuf>, config: &ClasslinkConfig) -> Result<Self> {
        let project_root = project_root.into();
        let exclude = build_exclude_set(&config.resolve.exclude)
            .context("invalid resolve.exclude glob pattern")?;
        Ok(Self {
            cache_file: config.cache_path(&project_root),
            project_root,
            walk: WalkOptions {
                exclude,
                respect_gitignore: config.resolve.respect_gitignore,
            },
        })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// Load the cache for a new batch. Read failures degrade to an empty cache.
    pub fn load_cache(&self) -> ClassPathCache {
        ClassPathCache::load_or_empty(&self.cache_file)
    }

    /// Resolve one batch of names: load the cache, resolve, flush if changed.
    ///
    /// Names that cannot be located are dropped from the result.
    pub fn find_class_paths<'a, I>(&self, names: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = &'a QualifiedClassName>,
    {
        let mut cache = self.load_cache();
        let paths = self.resolve_with_cache(names, &mut cache);
        if let Err(e) = cache.flush() {
            tracing::debug!("{e}; resolved paths were not cached");
        }
        paths
    }

    /// Resolve names against an explicitly supplied cache, without flushing it.
    pub fn resolve_with_cache<'a, I>(&self, names: I, cache: &mut ClassPathCache) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = &'a QualifiedClassName>,
    {
        let mut source_roots: Option<Vec<PathBuf>> = None;
        let mut paths = Vec::new();
        for name in names {
            if let Some(path) = self.resolve_one(name, cache, &mut source_roots).path() {
                paths.push(path.to_path_buf());
            }
        }
        paths
    }

    /// Resolve a single name. Source roots are discovered on the first cache
    /// miss and reused for the rest of the batch.
    pub fn resolve_one(
        &self,
        name: &QualifiedClassName,
        cache: &mut ClassPathCache,
        source_roots: &mut Option<Vec<PathBuf>>,
    ) -> Resolution {
        if let Some(path) = cache.lookup_valid(name) {
            tracing::debug!("found {} in cache: {}", name, path.display());
            return Resolution::Cached(path);
        }

        let relative = name.relative_source_path();
        let roots = source_roots
            .get_or_insert_with(|| discover_source_roots(&self.project_root, &self.walk));

        tracing::debug!("checking source roots for {}", name);
        for base in roots.iter() {
            let candidate = base.join(&relative);
            if candidate.exists() {
                tracing::debug!("  {} (exists)", candidate.display());
                cache.insert(name.clone(), candidate.clone());
                return Resolution::Found(candidate);
            }
            tracing::trace!("  {} (not found)", candidate.display());
        }

        tracing::debug!("could not find {} in any source directory", name);
        Resolution::Missing
    }
}
