//! Output format dispatch for the CLI

use std::path::Path;

use anyhow::Context;
use indexdoclib::output::write_output;
use indexdoclib::{DocxRenderer, IndexDocument, MarkdownRenderer};

/// Default output location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "../docs/index.docx";

/// Names accepted by `--format`.
pub const FORMAT_NAMES: [&str; 3] = ["docx", "markdown", "json"];

/// Document format written by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Docx,
    Markdown,
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "docx" => Some(OutputFormat::Docx),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Guess the format from the output file extension, defaulting to DOCX
    pub fn infer(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_name)
            .unwrap_or(OutputFormat::Docx)
    }
}

/// Render `doc` in `format` and write it to `path`
fn write_document(doc: &IndexDocument, format: OutputFormat, path: &Path) -> anyhow::Result<()> {
    match format {
        OutputFormat::Docx => {
            let mut renderer = DocxRenderer::new();
            doc.render(&mut renderer)?;
            renderer.write_to(path)?;
        }
        OutputFormat::Markdown => {
            let mut renderer = MarkdownRenderer::new();
            doc.render(&mut renderer)?;
            renderer.write_to(path)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(doc)?;
            write_output(path, json.as_bytes())?;
        }
    }
    Ok(())
}

/// Check that `path` can be written before doing any work
pub fn ensure_writable_target(path: &Path) -> anyhow::Result<()> {
    if path.is_dir() {
        anyhow::bail!("output path is a directory: {}", path.display());
    }
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        if parent.exists() && !parent.is_dir() {
            anyhow::bail!("output parent is not a directory: {}", parent.display());
        }
    }
    Ok(())
}

/// Human-readable description of where the output goes
pub fn describe_target(path: &Path, format: OutputFormat) -> String {
    let display = path.display().to_string();
    match format {
        OutputFormat::Docx => display,
        OutputFormat::Markdown => format!("{display} (markdown)"),
        OutputFormat::Json => format!("{display} (json)"),
    }
}

/// Attach the output path to write failures
pub fn write_document_to(
    doc: &IndexDocument,
    format: OutputFormat,
    path: &Path,
) -> anyhow::Result<()> {
    write_document(doc, format, path)
        .with_context(|| format!("failed to write {}", path.display()))
}
