//! CLI binary for classlink: bundle a Java class with the classes it links to.

use anyhow::{Context, Result};
use clap::Parser;
use classlink_core::config::ClasslinkConfig;
use classlink_parser::java::JavaParser;
use classlink_resolve::bundle::{self, BundleFormat};
use classlink_resolve::export::{self, ExportError, ExportFormat};
use classlink_resolve::resolver::Resolver;
use classlink_resolve::{graph, traversal};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "classlink",
    about = "Analyze a Java class and dump the classes it links to"
)]
struct Cli {
    /// Path to the target Java class file
    #[arg(long)]
    file: PathBuf,

    /// Path to the root project folder
    #[arg(long)]
    root: PathBuf,

    /// Base package to filter classes (e.g., com.example)
    #[arg(long, alias = "base_package")]
    base_package: String,

    /// Depth of classes to fetch; 0 bundles only the target (defaults to traversal.default_depth, 1)
    #[arg(long)]
    depth: Option<u32>,

    /// Enable debug output
    #[arg(short, long, alias = "debug")]
    verbose: bool,

    /// Output format: txt, md, json (defaults to output.format, txt)
    #[arg(long)]
    format: Option<BundleFormat>,

    /// Bundle file to write (defaults to linked_classes.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate a dependency graph visualization
    #[arg(long)]
    graph: bool,

    /// Graph format: dot, mermaid
    #[arg(long, default_value = "dot")]
    graph_format: ExportFormat,

    /// Base name of the graph files
    #[arg(long, default_value = "class_dependencies")]
    graph_output: PathBuf,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Without a working grammar nothing can be analyzed.
    let parser = JavaParser::new().context("Java parsing backend is unavailable")?;

    if !cli.root.is_dir() {
        anyhow::bail!("project root {} is not a directory", cli.root.display());
    }
    let config = ClasslinkConfig::load(&cli.root)
        .with_context(|| format!("failed to load config from {}", cli.root.display()))?;
    let resolver = Resolver::from_config(&cli.root, &config)?;

    let depth = cli
        .depth
        .map_or(config.traversal.default_depth, |d| d as usize);
    let format = match cli.format {
        Some(format) => format,
        None => config
            .output
            .format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("invalid output.format in config")?,
    };

    let spinner = spinner(&format!("Analyzing {}...", cli.file.display()), cli.verbose);
    let report =
        traversal::find_linked_classes(&cli.file, depth, &cli.base_package, &resolver, &parser);
    spinner.finish_and_clear();
    tracing::info!(
        "{} classes found across {} files ({} failed)",
        report.classes.len(),
        report.files_visited,
        report.files_failed
    );

    let files = traversal::bundle_files(&cli.file, &report.classes, &resolver);
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("linked_classes.{}", format.extension())));
    let summary = bundle::write_bundle_file(&files, format, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    if summary.skipped > 0 {
        eprintln!("Skipped {} unreadable file(s)", summary.skipped);
    }

    if cli.graph {
        cmd_graph(&cli, depth, &resolver, &parser)?;
    }

    println!(
        "Successfully analyzed {} and wrote linked classes to {}",
        cli.file.display(),
        output.display()
    );
    Ok(())
}

/// Build the dependency graph, write it, and render a PNG when exporting DOT.
fn cmd_graph(cli: &Cli, depth: usize, resolver: &Resolver, parser: &JavaParser) -> Result<()> {
    let graph = graph::build_dependency_graph(&cli.file, depth, &cli.base_package, resolver, parser);
    let source = export::export(&graph, cli.graph_format);
    let graph_file = with_extension(&cli.graph_output, cli.graph_format.extension());
    std::fs::write(&graph_file, source)
        .with_context(|| format!("failed to write {}", graph_file.display()))?;

    if cli.graph_format != ExportFormat::Dot {
        println!("Generated dependency graph: {}", graph_file.display());
        return Ok(());
    }

    let png_file = with_extension(&cli.graph_output, "png");
    match export::render_png(&graph_file, &png_file) {
        Ok(()) => println!("Generated dependency graph: {}", png_file.display()),
        Err(e @ ExportError::RendererMissing) => {
            eprintln!("{e}");
            println!("Generated dependency graph: {}", graph_file.display());
        }
        Err(e) => {
            tracing::error!("{e}");
            println!("Generated dependency graph: {}", graph_file.display());
        }
    }
    Ok(())
}

/// Append an extension without replacing dots already in the base name.
fn with_extension(base: &Path, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Progress spinner on stderr; hidden in verbose mode so it does not
/// interleave with debug logs.
fn spinner(message: &str, verbose: bool) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    if verbose {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
