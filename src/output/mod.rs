//! Report writers.
//!
//! [`write_report`] picks a writer from [`OutputOptions::format`] or the file extension;
//! [`write_report_to_writer`] takes the format explicitly:
//!
//! - [`csv`]: `label,value` rows
//! - [`json`]: a JSON object of the report fields
//! - [`text`]: human-readable lines

pub mod csv;
pub mod json;
pub mod text;

use std::io::Write;
use std::path::Path;

use crate::aggregate::Report;
use crate::error::{OutputError, OutputResult};

pub use self::csv::{write_csv_report, write_csv_report_to_writer};
pub use self::json::{write_json_report, write_json_report_to_writer};
pub use self::text::{write_text_report, write_text_report_to_writer};

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Text,
}

impl OutputFormat {
    /// Parse an output format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "txt" | "text" | "log" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Options controlling report rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    /// If `None`, infer the format from the output file extension.
    pub format: Option<OutputFormat>,
    /// Rendered in place of the mean by the CSV and text writers when there is no mean.
    /// JSON always uses `null`.
    pub missing_mean: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: None,
            missing_mean: "no data".to_string(),
        }
    }
}

/// Write `report` to `path` in the configured (or inferred) format.
pub fn write_report(path: impl AsRef<Path>, report: &Report, options: &OutputOptions) -> OutputResult<()> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };
    match fmt {
        OutputFormat::Csv => write_csv_report(path, report, options),
        OutputFormat::Json => write_json_report(path, report),
        OutputFormat::Text => write_text_report(path, report, options),
    }
}

/// Write `report` in `format` to any writer (e.g. a locked stdout).
pub fn write_report_to_writer<W: Write>(
    writer: W,
    report: &Report,
    format: OutputFormat,
    options: &OutputOptions,
) -> OutputResult<()> {
    match format {
        OutputFormat::Csv => write_csv_report_to_writer(writer, report, options),
        OutputFormat::Json => write_json_report_to_writer(writer, report),
        OutputFormat::Text => write_text_report_to_writer(writer, report, options),
    }
}

fn infer_format_from_path(path: &Path) -> OutputResult<OutputFormat> {
    path.extension()
        .and_then(|s| s.to_str())
        .and_then(OutputFormat::from_extension)
        .ok_or_else(|| OutputError::UnknownFormat {
            message: format!("cannot infer output format for path ({})", path.display()),
        })
}

pub(crate) fn format_number(v: f64) -> String {
    format!("{v}")
}

pub(crate) fn format_mean(report: &Report, options: &OutputOptions) -> String {
    match report.mean() {
        Some(mean) => format_number(mean),
        None => options.missing_mean.clone(),
    }
}
