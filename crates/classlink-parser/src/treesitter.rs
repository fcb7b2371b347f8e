//! Tree-sitter integration for Java AST parsing.

use crate::parser::ParseError;
use std::path::Path;

/// Build a parser loaded with the Java grammar.
pub fn java_parser() -> Result<tree_sitter::Parser, ParseError> {
    let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| ParseError::Grammar(e.to_string()))?;
    Ok(parser)
}

/// Parse Java source and return the tree, rejecting trees with syntax errors.
pub fn parse_source(
    parser: &mut tree_sitter::Parser,
    path: &Path,
    source: &str,
) -> Result<tree_sitter::Tree, ParseError> {
    let tree = parser
        .parse(source.as_bytes(), None)
        .ok_or_else(|| ParseError::Syntax {
            path: path.to_path_buf(),
            line: 1,
        })?;
    let root = tree.root_node();
    if root.has_error() {
        let line = first_error_line(&root).unwrap_or(0) + 1;
        return Err(ParseError::Syntax {
            path: path.to_path_buf(),
            line,
        });
    }
    Ok(tree)
}

/// Zero-based row of the first error or missing node under `node`.
fn first_error_line(node: &tree_sitter::Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error()
            && let Some(row) = first_error_line(&child)
        {
            return Some(row);
        }
    }
    None
}
