//! Source adapters: turn files into flat token sequences.
//!
//! Most callers should use [`aggregate_path`] or [`load_tokens`] (from [`unified`]), which:
//!
//! - auto-detect format by file extension (or you can override via [`IngestionOptions`])
//! - flatten the source into a `Vec<`[`crate::types::Token`]`>`
//! - optionally report per-token outcomes and failures to an
//!   [`crate::observability::AggregationObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]

pub mod csv;
pub mod json;
pub mod unified;

pub use self::csv::CsvOptions;
pub use self::json::JsonOptions;
pub use self::unified::{aggregate_path, load_tokens, try_aggregate_path, IngestionOptions, SourceFormat};
