//! Unified path-based entrypoints.
//!
//! - [`load_tokens`] reads a file into a flat token sequence, inferring the format from the file
//!   extension unless [`IngestionOptions::format`] is set.
//! - [`aggregate_path`] loads and aggregates in one step. A source that cannot be read resolves to
//!   [`Report::empty`] after being reported to the configured observer.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::aggregate::{aggregate, aggregate_with, Report};
use crate::error::{IngestionError, IngestionResult};
use crate::observability::{AggregationObserver, Severity, SourceContext};
use crate::types::Token;

use super::csv::{self, CsvOptions};
use super::json::{self, JsonOptions};

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values (or another delimiter, see [`CsvOptions`]).
    Csv,
    /// Tab-separated values.
    Tsv,
    /// A JSON document or NDJSON.
    Json,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "json" | "ndjson" | "jsonl" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options controlling path-based loading and aggregation.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<SourceFormat>,
    /// CSV-specific options. For [`SourceFormat::Tsv`] the delimiter is forced to a tab.
    pub csv: CsvOptions,
    /// JSON-specific options.
    pub json: JsonOptions,
    /// Optional observer for per-token diagnostics, logging and alerts.
    pub observer: Option<Arc<dyn AggregationObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("csv", &self.csv)
            .field("json", &self.json)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            csv: CsvOptions::default(),
            json: JsonOptions::default(),
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Load a file into a flat token sequence.
///
/// # Examples
///
/// ```no_run
/// use rust_value_aggregation::aggregate::aggregate;
/// use rust_value_aggregation::ingestion::{load_tokens, IngestionOptions};
///
/// # fn main() -> Result<(), rust_value_aggregation::IngestionError> {
/// // Uses `.csv` to select CSV reading.
/// let tokens = load_tokens("data.csv", &IngestionOptions::default())?;
/// let report = aggregate(&tokens);
/// println!("mean={:?}", report.mean());
/// # Ok(())
/// # }
/// ```
pub fn load_tokens(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Vec<Token>> {
    let path = path.as_ref();
    let fmt = resolve_format(path, options)?;
    load_with_format(path, fmt, options)
}

/// Load and aggregate a file, propagating source errors.
///
/// Source failures are still reported to the configured observer before being returned.
pub fn try_aggregate_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Report> {
    let path = path.as_ref();
    let fmt = resolve_format(path, options)?;
    let ctx = SourceContext {
        path: path.to_path_buf(),
        format: fmt,
    };

    match load_with_format(path, fmt, options) {
        Ok(tokens) => Ok(match options.observer.as_deref() {
            Some(obs) => aggregate_with(&tokens, obs),
            None => aggregate(&tokens),
        }),
        Err(e) => {
            if let Some(obs) = options.observer.as_ref() {
                let sev = severity_for_error(&e);
                obs.on_source_failure(&ctx, sev, &e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, &e);
                }
            }
            Err(e)
        }
    }
}

/// Load and aggregate a file.
///
/// Never fails: a source that cannot be read or flattened yields [`Report::empty`].
///
/// ## Observability (`tracing` events + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use rust_value_aggregation::ingestion::{aggregate_path, IngestionOptions};
/// use rust_value_aggregation::observability::{Severity, TracingObserver};
///
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: Severity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are treated as Critical and trigger `on_alert` at this threshold.
/// let report = aggregate_path("does_not_exist.csv", &opts);
/// assert!(report.is_empty());
/// ```
pub fn aggregate_path(path: impl AsRef<Path>, options: &IngestionOptions) -> Report {
    try_aggregate_path(path, options).unwrap_or_else(|_| Report::empty())
}

fn resolve_format(path: &Path, options: &IngestionOptions) -> IngestionResult<SourceFormat> {
    match options.format {
        Some(f) => Ok(f),
        None => infer_format_from_path(path),
    }
}

fn load_with_format(path: &Path, fmt: SourceFormat, options: &IngestionOptions) -> IngestionResult<Vec<Token>> {
    match fmt {
        SourceFormat::Csv => csv::read_csv_tokens_from_path(path, &options.csv),
        SourceFormat::Tsv => {
            let csv_opts = CsvOptions {
                delimiter: b'\t',
                ..options.csv.clone()
            };
            csv::read_csv_tokens_from_path(path, &csv_opts)
        }
        SourceFormat::Json => json::read_json_tokens_from_path(path, &options.json),
    }
}

fn severity_for_error(e: &IngestionError) -> Severity {
    match e {
        // Invalid UTF-8 surfaced by `read_to_string`.
        IngestionError::Io(err) if err.kind() == std::io::ErrorKind::InvalidData => Severity::Error,
        IngestionError::Io(_) => Severity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        IngestionError::Json(err) if err.is_io() => Severity::Critical,
        IngestionError::Json(_) => Severity::Error,
        IngestionError::SourceShape { .. } => Severity::Error,
        IngestionError::UnknownFormat { .. } => Severity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> IngestionResult<SourceFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::UnknownFormat {
            message: format!("cannot infer format: path has no extension ({})", path.display()),
        })?;

    SourceFormat::from_extension(ext).ok_or_else(|| IngestionError::UnknownFormat {
        message: format!("cannot infer format from extension '{ext}' for path ({})", path.display()),
    })
}
