//! Discovery of candidate source roots under a project directory.

use globset::GlobSet;
use std::path::{Path, PathBuf};

/// Directory suffix of a conventional main source tree.
const MAIN_SOURCE_DIR: [&str; 3] = ["src", "main", "java"];

/// Generic source directory name.
const SOURCE_DIR: &str = "src";

/// How to walk the project when looking for source roots.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Directories (root-relative) matching these globs are never roots and
    /// are not descended into.
    pub exclude: Option<GlobSet>,
    /// Honour `.gitignore` / `.git/info/exclude` while walking.
    pub respect_gitignore: bool,
}

/// Candidate source roots in precedence order:
///
/// 1. every directory under `project_root` ending in `src/main/java`
/// 2. every directory named `src`
/// 3. `project_root` itself
///
/// Within the first two groups, roots appear in directory-walk order.
pub fn discover_source_roots(project_root: &Path, options: &WalkOptions) -> Vec<PathBuf> {
    let mut main_roots = Vec::new();
    let mut src_roots = Vec::new();

    let root = project_root.to_path_buf();
    let exclude = options.exclude.clone();
    let walker = ignore::WalkBuilder::new(project_root)
        .standard_filters(false)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .require_git(false)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            if entry.file_name() == ".git" {
                return false;
            }
            match &exclude {
                Some(set) => {
                    let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                    !set.is_match(rel)
                }
                None => true,
            }
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("skipping unreadable entry while scanning for sources: {e}");
                continue;
            }
        };
        if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
            continue;
        }
        let path = entry.path();
        if is_main_source_root(path) {
            main_roots.push(path.to_path_buf());
        }
        if path.file_name().is_some_and(|n| n == SOURCE_DIR) {
            src_roots.push(path.to_path_buf());
        }
    }

    tracing::debug!(
        "found {} main source roots and {} src roots under {}",
        main_roots.len(),
        src_roots.len(),
        project_root.display()
    );

    let mut roots = main_roots;
    roots.extend(src_roots);
    roots.push(project_root.to_path_buf());
    roots
}

fn is_main_source_root(path: &Path) -> bool {
    path.ends_with(MAIN_SOURCE_DIR.iter().collect::<PathBuf>())
}

/// Build a glob set from user-supplied patterns.
pub fn build_exclude_set(patterns: &[String]) -> Result<Option<GlobSet>, globset::Error> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = globset::GlobSetBuilder::new();
    for p in patterns {
        builder.add(globset::Glob::new(p)?);
    }
    builder.build().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn main_roots_precede_src_roots_and_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("app/src/main/java")).unwrap();
        fs::create_dir_all(root.join("lib/src")).unwrap();

        let roots = discover_source_roots(root, &WalkOptions::default());
        assert_eq!(roots[0], root.join("app/src/main/java"));
        assert!(roots.contains(&root.join("app/src")));
        assert!(roots.contains(&root.join("lib/src")));
        assert_eq!(roots.last(), Some(&root.to_path_buf()));
        assert_eq!(roots.len(), 4);
    }

    #[test]
    fn excluded_directories_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("build/generated/src/main/java")).unwrap();
        fs::create_dir_all(root.join("core/src/main/java")).unwrap();

        let options = WalkOptions {
            exclude: build_exclude_set(&["build".to_string()]).unwrap(),
            respect_gitignore: false,
        };
        let roots = discover_source_roots(root, &options);
        assert!(roots.contains(&root.join("core/src/main/java")));
        assert!(!roots.iter().any(|r| r.starts_with(root.join("build"))));
    }

    #[test]
    fn no_patterns_means_no_glob_set() {
        assert!(build_exclude_set(&[]).unwrap().is_none());
        assert!(build_exclude_set(&["[".to_string()]).is_err());
    }
}
