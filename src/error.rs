use thiserror::Error;

/// Convenience result type for loading token sources.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for writing reports.
pub type OutputResult<T> = Result<T, OutputError>;

/// Error type returned by source adapters.
///
/// Malformed *values* are never errors (they are counted as invalid entries); these variants
/// cover sources that cannot be read or flattened at all.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON syntax error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is readable but cannot be turned into a token sequence.
    #[error("unusable source: {message}")]
    SourceShape { message: String },

    /// No source format could be chosen for the path.
    #[error("unknown source format: {message}")]
    UnknownFormat { message: String },
}

/// Error type returned by report writers.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// No output format could be chosen for the path.
    #[error("unknown output format: {message}")]
    UnknownFormat { message: String },
}

/// Error type returned by [`crate::batch::run_batch`].
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("num_threads must be > 0 when set")]
    InvalidThreads,

    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
