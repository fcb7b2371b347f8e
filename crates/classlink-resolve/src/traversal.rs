//! Level-by-level discovery of the classes a target file links to.

use crate::resolver::Resolver;
use classlink_core::names::QualifiedClassName;
use classlink_parser::parser::SourceParser;
use classlink_parser::references::extract_references;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Result of a traversal.
#[derive(Debug, Clone, Default)]
pub struct TraversalReport {
    /// Every in-scope class discovered within the depth bound.
    pub classes: BTreeSet<QualifiedClassName>,
    /// Number of distinct files handed to the parser.
    pub files_visited: usize,
    /// Number of files the parser rejected.
    pub files_failed: usize,
    /// Levels actually expanded (at most the requested depth).
    pub levels: usize,
}

/// Key used to recognise the same file reached through different spellings.
pub(crate) fn file_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Discover the classes under `base_namespace` reachable from `target` in at
/// most `depth` reference hops.
///
/// Level 0 parses `target` itself; each following level parses the files of
/// the classes first discovered on the previous level. A class is expanded at
/// most once, so reference cycles terminate. Files that fail to parse are
/// logged and skipped.
pub fn find_linked_classes(
    target: &Path,
    depth: usize,
    base_namespace: &str,
    resolver: &Resolver,
    parser: &dyn SourceParser,
) -> TraversalReport {
    let mut report = TraversalReport::default();
    let mut visited_files: HashSet<PathBuf> = HashSet::new();
    let mut frontier = vec![target.to_path_buf()];

    tracing::debug!(
        "starting analysis of {} at depth {}",
        target.display(),
        depth
    );

    for level in 0..depth {
        tracing::debug!(
            "level {}: {} file(s) to inspect",
            level + 1,
            frontier.len()
        );
        report.levels = level + 1;

        let mut next_level: Vec<PathBuf> = Vec::new();
        let mut queued: HashSet<PathBuf> = HashSet::new();

        for file in &frontier {
            if !visited_files.insert(file_key(file)) {
                tracing::debug!("  skipping already visited file {}", file.display());
                continue;
            }
            report.files_visited += 1;

            let unit = match parser.parse_file(file) {
                Ok(unit) => unit,
                Err(e) => {
                    tracing::warn!("{e}");
                    report.files_failed += 1;
                    continue;
                }
            };

            let linked = extract_references(&unit, base_namespace);
            let new_classes: BTreeSet<QualifiedClassName> =
                linked.difference(&report.classes).cloned().collect();
            tracing::debug!(
                "  {}: {} linked, {} new",
                file.display(),
                linked.len(),
                new_classes.len()
            );
            if new_classes.is_empty() {
                continue;
            }
            report.classes.extend(new_classes.iter().cloned());

            for path in resolver.find_class_paths(&new_classes) {
                if queued.insert(file_key(&path)) {
                    next_level.push(path);
                }
            }
        }

        frontier = next_level;
        tracing::debug!(
            "level {} summary: {} files processed, {} classes found, {} files next",
            level + 1,
            visited_files.len(),
            report.classes.len(),
            frontier.len()
        );

        if frontier.is_empty() {
            tracing::debug!("no more files to process, stopping early");
            break;
        }
    }

    report
}

/// Files to bundle for a traversal: the target first, then the re-resolved
/// files of every discovered class, sorted and without duplicates.
pub fn bundle_files(target: &Path, classes: &BTreeSet<QualifiedClassName>, resolver: &Resolver) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    seen.insert(file_key(target));

    let mut resolved: Vec<PathBuf> = resolver
        .find_class_paths(classes)
        .into_iter()
        .filter(|p| seen.insert(file_key(p)))
        .collect();
    resolved.sort();

    let mut files = Vec::with_capacity(resolved.len() + 1);
    files.push(target.to_path_buf());
    files.extend(resolved);
    files
}
