//! Dependency discovery for classlink.
//!
//! - [`resolver`]: class name → source file, backed by the class-path cache
//! - [`traversal`]: level-by-level discovery of linked classes
//! - [`graph`]: depth-first dependency graph for visualization
//! - [`bundle`]: concatenate discovered files into one document
//! - [`export`]: DOT / Mermaid rendering of the dependency graph

pub mod bundle;
pub mod export;
pub mod graph;
pub mod resolver;
pub mod roots;
pub mod traversal;
