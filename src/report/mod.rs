//! Report rendering and output.

pub mod generator;
pub mod text;

pub use generator::{generate_json_report, generate_markdown_report};
pub use text::generate_text_report;

use crate::cli::OutputFormat;
use crate::models::Report;
use anyhow::{Context, Result};
use std::path::Path;

/// Render `report` in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(report)),
        OutputFormat::Markdown => Ok(generate_markdown_report(report)),
        OutputFormat::Json => generate_json_report(report),
    }
}

/// Write rendered output to `path`, or to stdout when `path` is `None`.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
