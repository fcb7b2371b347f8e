//! Node/edge model of a class dependency graph, used for visualization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A class node, keyed by its file stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNode {
    pub name: String,
    /// True for the file the analysis started from.
    pub is_target: bool,
}

/// A directed `source → target` dependency between two class stems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
}

/// Class dependency graph.
///
/// Edges are kept in discovery order and may contain duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub nodes: BTreeMap<String, ClassNode>,
    pub edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or upgrade an existing one to target status.
    pub fn add_node(&mut self, name: &str, is_target: bool) {
        self.nodes
            .entry(name.to_string())
            .and_modify(|n| n.is_target |= is_target)
            .or_insert_with(|| ClassNode {
                name: name.to_string(),
                is_target,
            });
    }

    pub fn add_edge(&mut self, source: &str, target: &str) {
        self.edges.push(DependencyEdge {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    /// The target node, if one was recorded.
    pub fn target(&self) -> Option<&ClassNode> {
        self.nodes.values().find(|n| n.is_target)
    }

    /// Direct dependencies of `source`, in discovery order (duplicates kept).
    pub fn dependencies_of<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == source)
            .map(|e| e.target.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
