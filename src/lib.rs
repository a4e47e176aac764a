//! `rust-value-aggregation` turns loosely-typed values from CSV or JSON sources into numbers and
//! reports their total, the number of valid and invalid entries, and their mean.
//!
//! A single malformed entry never fails a run: every value is classified as either a finite
//! number or an invalid entry, and invalid entries are only counted.
//!
//! ## Pipeline
//!
//! 1. A source adapter ([`ingestion`]) flattens a file into a `Vec<`[`types::Token`]`>`.
//! 2. [`classify::classify`] decides, per token, whether it is a usable number.
//! 3. [`aggregate::aggregate`] folds the outcomes into an immutable [`aggregate::Report`].
//! 4. A writer ([`output`]) renders the report as CSV, JSON or plain text.
//!
//! ## Classification rules
//!
//! - integers and finite floats are valid;
//! - text is trimmed and parsed as a decimal literal (`"12"`, `" -2.5 "`, `"1e3"`); thousands
//!   separators, decimal commas and surrounding text are rejected;
//! - `null`, booleans and structured values (objects/arrays) are always invalid.
//!
//! ## Quick example
//!
//! ```rust
//! use rust_value_aggregation::aggregate::aggregate;
//! use rust_value_aggregation::types::Token;
//!
//! let tokens = vec![Token::from(10), Token::from("abc"), Token::from(" 20 "), Token::Null];
//! let report = aggregate(&tokens);
//!
//! assert_eq!(report.total(), 30.0);
//! assert_eq!(report.valid_count(), 2);
//! assert_eq!(report.invalid_count(), 2);
//! assert_eq!(report.mean(), Some(15.0));
//! ```
//!
//! With no valid entries there is no mean, and the report carries a message instead:
//!
//! ```rust
//! use rust_value_aggregation::aggregate::aggregate;
//!
//! let report = aggregate(&[]);
//! assert_eq!(report.mean(), None);
//! assert_eq!(report.message(), Some("no valid data to compute an average"));
//! ```
//!
//! ## From files
//!
//! ```no_run
//! use rust_value_aggregation::ingestion::{aggregate_path, IngestionOptions};
//! use rust_value_aggregation::output::{write_report, OutputOptions};
//!
//! # fn main() -> Result<(), rust_value_aggregation::OutputError> {
//! // Auto-detects by extension (.csv/.tsv/.json/.ndjson).
//! let report = aggregate_path("data.json", &IngestionOptions::default());
//! write_report("results.csv", &report, &OutputOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the [`types::Token`] input model
//! - [`classify`]: per-token classification
//! - [`aggregate`]: accumulation and the final report
//! - [`ingestion`]: CSV/JSON source adapters and path-based entrypoints
//! - [`output`]: report writers
//! - [`observability`]: observer hooks for diagnostics and alerts
//! - [`batch`]: concurrent runs over several sources
//! - [`error`]: error types

pub mod aggregate;
pub mod batch;
pub mod classify;
pub mod error;
pub mod ingestion;
pub mod observability;
pub mod output;
pub mod types;

pub use aggregate::{aggregate, Report};
pub use classify::{classify, Classified};
pub use error::{BatchError, IngestionError, IngestionResult, OutputError, OutputResult};
pub use types::Token;
