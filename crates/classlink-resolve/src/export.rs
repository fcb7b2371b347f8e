//! Export a class dependency graph as DOT (Graphviz) or a Mermaid flowchart.

use classlink_core::graph::DependencyGraph;
use std::fmt::Write;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

/// Export format for graph visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Dot,
    Mermaid,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Mermaid => "mmd",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" | "graphviz" => Ok(Self::Dot),
            "mermaid" | "mmd" => Ok(Self::Mermaid),
            other => Err(format!("unknown graph format: {other} (expected dot or mermaid)")),
        }
    }
}

/// Errors from rendering a DOT file to an image.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("graphviz `dot` executable not found; install graphviz to render images")]
    RendererMissing,
    #[error("graphviz `dot` failed: {0}")]
    RenderFailed(String),
    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// Export the graph as a DOT (Graphviz) string.
pub fn export_dot(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    writeln!(out, "// Class Dependencies").unwrap();
    writeln!(out, "digraph {{").unwrap();
    writeln!(out, "  rankdir=LR;").unwrap();
    writeln!(out).unwrap();

    for node in graph.nodes.values() {
        let name = dot_escape(&node.name);
        if node.is_target {
            writeln!(
                out,
                "  \"{}\" [label=\"{}\", shape=box, style=filled, fillcolor=lightblue];",
                name, name
            )
            .unwrap();
        } else {
            writeln!(out, "  \"{}\" [label=\"{}\"];", name, name).unwrap();
        }
    }

    writeln!(out).unwrap();

    for edge in &graph.edges {
        writeln!(
            out,
            "  \"{}\" -> \"{}\";",
            dot_escape(&edge.source),
            dot_escape(&edge.target)
        )
        .unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Export the graph as a Mermaid flowchart string.
pub fn export_mermaid(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    writeln!(out, "flowchart LR").unwrap();

    for node in graph.nodes.values() {
        writeln!(out, "  {}[\"{}\"]", mermaid_safe_id(&node.name), node.name).unwrap();
    }
    if let Some(target) = graph.target() {
        writeln!(out, "  style {} fill:#add8e6", mermaid_safe_id(&target.name)).unwrap();
    }

    for edge in &graph.edges {
        writeln!(
            out,
            "  {} --> {}",
            mermaid_safe_id(&edge.source),
            mermaid_safe_id(&edge.target)
        )
        .unwrap();
    }

    out
}

/// Make an ID safe for Mermaid (replace special characters).
fn mermaid_safe_id(id: &str) -> String {
    id.replace([':', '/', '.', ' ', '-', '$'], "_")
}

/// Export the graph in the specified format.
pub fn export(graph: &DependencyGraph, format: ExportFormat) -> String {
    match format {
        ExportFormat::Dot => export_dot(graph),
        ExportFormat::Mermaid => export_mermaid(graph),
    }
}

/// Render a DOT file to PNG with the external Graphviz `dot` executable.
pub fn render_png(dot_file: &Path, png_file: &Path) -> Result<(), ExportError> {
    let output = match Command::new("dot")
        .arg("-Tpng")
        .arg(dot_file)
        .arg("-o")
        .arg(png_file)
        .output()
    {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ExportError::RendererMissing);
        }
        Err(e) => return Err(e.into()),
    };
    if !output.status.success() {
        return Err(ExportError::RenderFailed(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(())
}
