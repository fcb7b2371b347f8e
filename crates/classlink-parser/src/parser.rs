//! The parsing seam: anything that can turn a file into a [`ParsedUnit`].

use crate::unit::ParsedUnit;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from turning a file into a [`ParsedUnit`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("file {0} does not exist")]
    NotFound(PathBuf),
    #[error("file {0} is not a Java file")]
    WrongExtension(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to load Java grammar: {0}")]
    Grammar(String),
    #[error("syntax error in {path} at line {line}")]
    Syntax { path: PathBuf, line: usize },
}

impl ParseError {
    /// Whether this error means the parsing backend itself is unusable, as
    /// opposed to a problem with one particular file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Grammar(_))
    }
}

/// Source-grammar backend.
///
/// Given a file, returns its package, imports, and type declarations, or fails
/// with a [`ParseError`] on missing or malformed input.
pub trait SourceParser {
    fn parse_file(&self, path: &Path) -> Result<ParsedUnit, ParseError>;
}
