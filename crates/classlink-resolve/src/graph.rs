//! Depth-first dependency graph construction for visualization.
//!
//! Unlike [`crate::traversal`], this recursion shares one flat set of visited
//! files across all branches. A file first reached deep in one branch is not
//! expanded again when another branch reaches it at a shallower depth, so
//! the graph may stop short of what a per-path depth bound would show.

use crate::resolver::Resolver;
use crate::traversal::file_key;
use classlink_core::graph::DependencyGraph;
use classlink_parser::parser::SourceParser;
use classlink_parser::references::extract_references;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

struct GraphBuilder<'a> {
    depth: usize,
    base_namespace: &'a str,
    resolver: &'a Resolver,
    parser: &'a dyn SourceParser,
    visited: HashSet<PathBuf>,
    graph: DependencyGraph,
}

/// Build the class dependency graph rooted at `target`, `depth` levels deep.
/// Nodes are named by file stem; the target node is flagged.
pub fn build_dependency_graph(
    target: &Path,
    depth: usize,
    base_namespace: &str,
    resolver: &Resolver,
    parser: &dyn SourceParser,
) -> DependencyGraph {
    let mut builder = GraphBuilder {
        depth,
        base_namespace,
        resolver,
        parser,
        visited: HashSet::new(),
        graph: DependencyGraph::new(),
    };
    builder.analyze(target, 0);
    builder.graph
}

impl GraphBuilder<'_> {
    fn analyze(&mut self, file: &Path, current_depth: usize) {
        if current_depth >= self.depth || !self.visited.insert(file_key(file)) {
            return;
        }

        let unit = match self.parser.parse_file(file) {
            Ok(unit) => unit,
            Err(e) => {
                tracing::warn!("{e}");
                return;
            }
        };

        let source = class_stem(file);
        self.graph.add_node(&source, current_depth == 0);

        let linked = extract_references(&unit, self.base_namespace);
        let dep_paths = self.resolver.find_class_paths(&linked);

        for dep_path in dep_paths {
            let dep = class_stem(&dep_path);
            self.graph.add_node(&dep, false);
            self.graph.add_edge(&source, &dep);
            self.analyze(&dep_path, current_depth + 1);
        }
    }
}

fn class_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
