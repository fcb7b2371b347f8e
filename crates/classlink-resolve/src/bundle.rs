//! Concatenate source files into a single plain-text, Markdown, or JSON bundle.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const SEPARATOR_WIDTH: usize = 80;

/// Bundle output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BundleFormat {
    #[default]
    Plain,
    Markdown,
    Json,
}

impl BundleFormat {
    /// File extension, also the name accepted on the command line.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Plain => "txt",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for BundleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for BundleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "plain" | "text" => Ok(Self::Plain),
            "md" | "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown bundle format: {other} (expected txt, md, or json)")),
        }
    }
}

/// Counts from writing a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Drop everything before the package declaration (license headers and the
/// like). Content without one is returned whole.
pub fn strip_preamble(content: &str) -> &str {
    match content.find("package ") {
        Some(idx) => &content[idx..],
        None => content,
    }
}

/// Write `files` to `out` in `format`.
///
/// Files that cannot be read are reported and skipped; the rest are still
/// written.
pub fn write_bundle<W: Write>(files: &[PathBuf], format: BundleFormat, mut out: W) -> io::Result<BundleSummary> {
    let mut summary = BundleSummary::default();
    let mut entries: Vec<(String, String)> = Vec::new();

    for file in files {
        let content = match read_source(file) {
            Some(content) => content,
            None => {
                summary.skipped += 1;
                continue;
            }
        };
        let body = strip_preamble(&content);
        let label = file.display().to_string();
        match format {
            BundleFormat::Plain => write_plain(&mut out, &label, body)?,
            BundleFormat::Markdown => write_markdown(&mut out, &label, body)?,
            BundleFormat::Json => entries.push((label, body.to_string())),
        }
        summary.written += 1;
    }

    if format == BundleFormat::Json {
        serde_json::to_writer_pretty(&mut out, &OrderedEntries(&entries)).map_err(io::Error::other)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(summary)
}

/// Write a bundle to `path`.
pub fn write_bundle_file(files: &[PathBuf], format: BundleFormat, path: &Path) -> io::Result<BundleSummary> {
    let file = std::fs::File::create(path)?;
    write_bundle(files, format, io::BufWriter::new(file))
}

fn read_source(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::error!("error reading file {}: {}", path.display(), e);
            None
        }
    }
}

fn write_plain<W: Write>(out: &mut W, label: &str, body: &str) -> io::Result<()> {
    let rule = "=".repeat(SEPARATOR_WIDTH);
    writeln!(out, "// File: {label}")?;
    writeln!(out, "{rule}")?;
    write!(out, "{body}")?;
    write!(out, "\n{rule}\n\n")
}

fn write_markdown<W: Write>(out: &mut W, label: &str, body: &str) -> io::Result<()> {
    writeln!(out, "## {label}\n")?;
    writeln!(out, "```java")?;
    write!(out, "{body}")?;
    write!(out, "\n```\n\n---\n\n")
}

/// Path → content map that keeps file order when serialized.
struct OrderedEntries<'a>(&'a [(String, String)]);

impl Serialize for OrderedEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, content) in self.0 {
            map.serialize_entry(path, content)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_preamble_drops_license_header() {
        let src = "/* Licensed under MIT */\npackage com.ex;\n\nclass A {}\n";
        assert_eq!(strip_preamble(src), "package com.ex;\n\nclass A {}\n");
        assert_eq!(strip_preamble("class B {}"), "class B {}");
    }

    #[test]
    fn format_names_parse() {
        assert_eq!("txt".parse::<BundleFormat>(), Ok(BundleFormat::Plain));
        assert_eq!("MD".parse::<BundleFormat>(), Ok(BundleFormat::Markdown));
        assert_eq!("json".parse::<BundleFormat>(), Ok(BundleFormat::Json));
        assert!("yaml".parse::<BundleFormat>().is_err());
        assert_eq!(BundleFormat::Markdown.to_string(), "md");
    }
}
