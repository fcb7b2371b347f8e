//! Tree-sitter based Java parsing for classlink.
//!
//! Turns a source file into a [`unit::ParsedUnit`] (package, imports, and
//! the supertypes of each top-level type) and derives the in-scope class
//! names that unit references.

pub mod java;
pub mod parser;
pub mod references;
pub mod treesitter;
pub mod unit;
