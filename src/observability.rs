//! Observer hooks for aggregation runs.
//!
//! The aggregation core never logs on its own. Instead, callers pass an
//! [`AggregationObserver`] which receives:
//!
//! - one [`TokenEvent`] per classified token (so invalid entries can be logged without
//!   re-classifying them),
//! - the final [`Report`],
//! - source failures (e.g. unreadable files) with a computed [`Severity`], plus an alert callback
//!   once the severity meets the configured threshold.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::aggregate::Report;
use crate::classify::Classified;
use crate::error::IngestionError;
use crate::ingestion::SourceFormat;
use crate::types::Token;

/// How bad a source failure is. Ordered, so it can be compared against an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    /// The source was readable but unusable (bad syntax, unresolved pointer, bad encoding).
    Error,
    /// The source could not be read at all (missing file, permissions).
    Critical,
}

/// Context about the source a run was loaded from.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// The input path.
    pub path: PathBuf,
    /// Format used to read the input.
    pub format: SourceFormat,
}

/// One classified token.
#[derive(Debug, Clone, Copy)]
pub struct TokenEvent<'a> {
    /// Zero-based position in the token sequence.
    pub index: usize,
    /// The raw token.
    pub token: &'a Token,
    /// The classification outcome.
    pub outcome: Classified,
}

/// Observer interface for aggregation runs.
///
/// All methods have empty defaults, so implementors only override what they need.
pub trait AggregationObserver: Send + Sync {
    /// Called once per token, in input order.
    fn on_token(&self, _event: &TokenEvent<'_>) {}

    /// Called once when a run is finalized.
    fn on_finished(&self, _report: &Report) {}

    /// Called when the source for a run could not be loaded.
    fn on_source_failure(&self, _ctx: &SourceContext, _severity: Severity, _error: &IngestionError) {}

    /// Called when a source failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_source_failure`].
    fn on_alert(&self, ctx: &SourceContext, severity: Severity, error: &IngestionError) {
        self.on_source_failure(ctx, severity, error)
    }
}

/// Forwards every callback to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn AggregationObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn AggregationObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl AggregationObserver for CompositeObserver {
    fn on_token(&self, event: &TokenEvent<'_>) {
        for o in &self.observers {
            o.on_token(event);
        }
    }

    fn on_finished(&self, report: &Report) {
        for o in &self.observers {
            o.on_finished(report);
        }
    }

    fn on_source_failure(&self, ctx: &SourceContext, severity: Severity, error: &IngestionError) {
        for o in &self.observers {
            o.on_source_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &SourceContext, severity: Severity, error: &IngestionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Emits `tracing` events: `warn` for invalid tokens, `debug` for valid ones, `info` for
/// finished runs and `error` for source failures.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl AggregationObserver for TracingObserver {
    fn on_token(&self, event: &TokenEvent<'_>) {
        match event.outcome {
            Classified::Valid(value) => {
                tracing::debug!(index = event.index, value, "valid entry");
            }
            Classified::Invalid(reason) => {
                tracing::warn!(
                    index = event.index,
                    token = %event.token,
                    reason = %reason,
                    "invalid entry"
                );
            }
        }
    }

    fn on_finished(&self, report: &Report) {
        tracing::info!(
            total = report.total(),
            valid = report.valid_count(),
            invalid = report.invalid_count(),
            mean = ?report.mean(),
            "aggregation finished"
        );
    }

    fn on_source_failure(&self, ctx: &SourceContext, severity: Severity, error: &IngestionError) {
        tracing::error!(
            ?severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "failed to load source"
        );
    }

    fn on_alert(&self, ctx: &SourceContext, severity: Severity, error: &IngestionError) {
        tracing::error!(
            alert = true,
            ?severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "failed to load source"
        );
    }
}

/// Appends one line per invalid entry, finished run and source failure to a log file.
///
/// Lines start with a unix timestamp in seconds.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// The file is created on first write. A log file that cannot be written is skipped silently.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn log(&self, line: fmt::Arguments<'_>) {
        let _held = self.lock.lock().ok();
        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) else {
            return;
        };
        let _ = writeln!(file, "{} {line}", unix_ts());
    }
}

impl AggregationObserver for FileObserver {
    fn on_token(&self, event: &TokenEvent<'_>) {
        if let Classified::Invalid(reason) = event.outcome {
            self.log(format_args!(
                "invalid index={} token={} reason={}",
                event.index, event.token, reason
            ));
        }
    }

    fn on_finished(&self, report: &Report) {
        self.log(format_args!("done {}", summary(report)));
    }

    fn on_source_failure(&self, ctx: &SourceContext, severity: Severity, error: &IngestionError) {
        self.log(format_args!(
            "source-failure {severity:?} {} ({:?}): {error}",
            ctx.path.display(),
            ctx.format
        ));
    }

    fn on_alert(&self, ctx: &SourceContext, severity: Severity, error: &IngestionError) {
        self.log(format_args!(
            "alert {severity:?} {} ({:?}): {error}",
            ctx.path.display(),
            ctx.format
        ));
    }
}

fn summary(report: &Report) -> String {
    match report.mean() {
        Some(mean) => format!(
            "total={} valid={} invalid={} mean={}",
            report.total(),
            report.valid_count(),
            report.invalid_count(),
            mean
        ),
        None => format!(
            "total={} valid={} invalid={} mean=none",
            report.total(),
            report.valid_count(),
            report.invalid_count()
        ),
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
