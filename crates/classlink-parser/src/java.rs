//! Java compilation-unit extraction backed by tree-sitter-java.

use crate::parser::{ParseError, SourceParser};
use crate::treesitter;
use crate::unit::{ImportDecl, ParsedUnit, TypeDecl, TypeKind};
use std::path::Path;

/// [`SourceParser`] for `.java` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaParser;

impl JavaParser {
    /// Create the parser, checking up front that the grammar loads.
    pub fn new() -> Result<Self, ParseError> {
        treesitter::java_parser()?;
        Ok(Self)
    }

    /// Extract a unit from already-loaded source text.
    pub fn parse_source(&self, path: &Path, source: &str) -> Result<ParsedUnit, ParseError> {
        let mut parser = treesitter::java_parser()?;
        let tree = treesitter::parse_source(&mut parser, path, source)?;
        Ok(extract_unit(&tree.root_node(), source))
    }
}

impl SourceParser for JavaParser {
    fn parse_file(&self, path: &Path) -> Result<ParsedUnit, ParseError> {
        if !path.exists() {
            return Err(ParseError::NotFound(path.to_path_buf()));
        }
        if path.extension().and_then(|e| e.to_str()) != Some("java") {
            return Err(ParseError::WrongExtension(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let unit = self.parse_source(path, &source)?;
        tracing::trace!(
            "{}: package {:?}, {} imports, {} types",
            path.display(),
            unit.package,
            unit.imports.len(),
            unit.types.len()
        );
        Ok(unit)
    }
}

/// Walk the top level of a `program` node.
fn extract_unit(root: &tree_sitter::Node, source: &str) -> ParsedUnit {
    let mut unit = ParsedUnit::default();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "package_declaration" => {
                if unit.package.is_none() {
                    unit.package = declared_name(&child, source);
                }
            }
            "import_declaration" => {
                if let Some(import) = parse_import(&child, source) {
                    unit.imports.push(import);
                }
            }
            "class_declaration" => unit.types.push(parse_type(&child, source, TypeKind::Class)),
            "interface_declaration" => {
                unit.types
                    .push(parse_type(&child, source, TypeKind::Interface));
            }
            "enum_declaration" => unit.types.push(parse_type(&child, source, TypeKind::Enum)),
            "record_declaration" => {
                unit.types.push(parse_type(&child, source, TypeKind::Record));
            }
            "annotation_type_declaration" => {
                unit.types
                    .push(parse_type(&child, source, TypeKind::Annotation));
            }
            _ => {}
        }
    }
    unit
}

fn node_text<'a>(node: &tree_sitter::Node, source: &'a str) -> &'a str {
    &source[node.byte_range()]
}

/// Name of a package or import: the `identifier` / `scoped_identifier` child.
fn declared_name(node: &tree_sitter::Node, source: &str) -> Option<String> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
        .map(|c| strip_whitespace(node_text(&c, source)))
}

fn parse_import(node: &tree_sitter::Node, source: &str) -> Option<ImportDecl> {
    let name = declared_name(node, source)?;
    let mut is_static = false;
    let mut is_wildcard = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "static" => is_static = true,
            "asterisk" => is_wildcard = true,
            _ => {}
        }
    }
    Some(ImportDecl {
        name,
        is_static,
        is_wildcard,
    })
}

fn parse_type(node: &tree_sitter::Node, source: &str, kind: TypeKind) -> TypeDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(&n, source).to_string())
        .unwrap_or_default();
    let mut decl = TypeDecl::new(&name, kind);

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            // class Foo extends Bar
            "superclass" => collect_type_names(&child, source, &mut decl.extends),
            // interface Foo extends Bar, Baz
            "extends_interfaces" => collect_type_names(&child, source, &mut decl.extends),
            // class / enum / record Foo implements Bar, Baz
            "super_interfaces" => collect_type_names(&child, source, &mut decl.implements),
            _ => {}
        }
    }
    decl
}

/// Collect referenced type names under a supertype clause, descending into
/// `type_list`.
fn collect_type_names(node: &tree_sitter::Node, source: &str, out: &mut Vec<String>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "type_list" {
            collect_type_names(&child, source, out);
        } else if let Some(name) = type_name(&child, source) {
            out.push(name);
        }
    }
}

/// Name of a type node with type arguments and annotations removed.
fn type_name(node: &tree_sitter::Node, source: &str) -> Option<String> {
    match node.kind() {
        "type_identifier" | "identifier" => Some(node_text(node, source).to_string()),
        "scoped_type_identifier" => Some(strip_type_arguments(&strip_whitespace(node_text(
            node, source,
        )))),
        "generic_type" => {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .find(|c| c.kind() != "type_arguments")
                .and_then(|c| type_name(&c, source))
        }
        "annotated_type" => {
            let mut cursor = node.walk();
            node.named_children(&mut cursor)
                .filter(|c| !matches!(c.kind(), "marker_annotation" | "annotation"))
                .find_map(|c| type_name(&c, source))
        }
        _ => None,
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `Outer<T>.Inner<U>` → `Outer.Inner`.
fn strip_type_arguments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
