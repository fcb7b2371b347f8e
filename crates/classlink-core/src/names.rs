//! Qualified class names and base-namespace filtering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Namespace root reserved for the Java standard library. Names under it are
/// never in scope, whatever base namespace is requested.
pub const RESERVED_ROOT: &str = "java.";

/// Conventional suffix of a Java source file.
pub const SOURCE_SUFFIX: &str = ".java";

/// Errors raised when constructing a [`QualifiedClassName`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NameError {
    #[error("qualified class name must not be empty")]
    Empty,
}

/// A dot-separated class name such as `com.example.order.OrderService`.
///
/// The name is only guaranteed to be non-empty; it may or may not resolve to
/// an existing source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedClassName(String);

impl QualifiedClassName {
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dotted segment (`com.ex.Foo` → `Foo`).
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Path of the source file relative to a source root
    /// (`com.ex.Foo` → `com/ex/Foo.java`). Empty segments add nothing, so a
    /// package-less `.Base` maps to `Base.java` directly under the root.
    pub fn relative_source_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        let mut segments = self.0.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{segment}{SOURCE_SUFFIX}"));
            }
        }
        path
    }
}

impl fmt::Display for QualifiedClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for QualifiedClassName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QualifiedClassName> for String {
    fn from(value: QualifiedClassName) -> Self {
        value.0
    }
}

impl AsRef<str> for QualifiedClassName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether `name` is in scope for traversal under `base`.
///
/// This is a literal string-prefix test, not a segment-aware one: with base
/// `com.ex`, `com.example.Foo` is accepted too. Callers relying on exact
/// namespace boundaries should use [`is_within_namespace`].
pub fn in_scope(name: &str, base: &str) -> bool {
    !name.starts_with(RESERVED_ROOT) && name.starts_with(base)
}

/// Segment-aware namespace check: `com.ex.Foo` is within `com.ex`,
/// `com.example.Foo` is not.
pub fn is_within_namespace(name: &str, base: &str) -> bool {
    if name.starts_with(RESERVED_ROOT) {
        return false;
    }
    let base = base.trim_end_matches('.');
    if base.is_empty() {
        return true;
    }
    match name.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
