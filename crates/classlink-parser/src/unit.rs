//! Structured view of one parsed source file.

/// A parsed compilation unit: everything classlink needs from a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUnit {
    /// Declared package, if any.
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    /// Top-level type declarations, in source order.
    pub types: Vec<TypeDecl>,
}

impl ParsedUnit {
    /// Declared package, or `""` when the unit has none.
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or("")
    }
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Imported name without `import`, `static`, a trailing `.*`, or `;`.
    pub name: String,
    pub is_static: bool,
    /// `import a.b.*` / `import static a.b.C.*`.
    pub is_wildcard: bool,
}

impl ImportDecl {
    pub fn single(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_static: false,
            is_wildcard: false,
        }
    }

    pub fn static_member(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_static: true,
            is_wildcard: false,
        }
    }
}

/// Kind of a top-level type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A type declaration together with the supertypes it names.
///
/// Supertype names are as written in source (simple or dotted), with type
/// arguments removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    /// `extends` clause: the superclass of a class, or the extended
    /// interfaces of an interface.
    pub extends: Vec<String>,
    /// `implements` clause of a class, enum, or record.
    pub implements: Vec<String>,
}

impl TypeDecl {
    pub fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            extends: Vec::new(),
            implements: Vec::new(),
        }
    }
}
