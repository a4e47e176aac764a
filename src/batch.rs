//! Concurrent aggregation of several sources.
//!
//! Each [`AggregationRequest`] is an independent run with its own accumulator; [`run_batch`]
//! only parallelises across requests, never within one.

use std::fmt;
use std::path::PathBuf;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::aggregate::Report;
use crate::error::BatchError;
use crate::ingestion::{aggregate_path, IngestionOptions};

/// An owned request to aggregate one source.
///
/// This can be useful if you want to enqueue aggregation work in a job system.
#[derive(Clone)]
pub struct AggregationRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling loading and observation.
    pub options: IngestionOptions,
}

impl fmt::Debug for AggregationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregationRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl AggregationRequest {
    pub fn new(path: impl Into<PathBuf>, options: IngestionOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Execute the request by calling [`aggregate_path`].
    pub fn run(&self) -> Report {
        aggregate_path(&self.path, &self.options)
    }
}

/// Configuration for [`run_batch`].
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Number of worker threads.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
}

/// Run every request on a dedicated thread pool.
///
/// Reports are returned in request order. Unreadable sources yield [`Report::empty`] like
/// [`AggregationRequest::run`].
pub fn run_batch(requests: &[AggregationRequest], options: &BatchOptions) -> Result<Vec<Report>, BatchError> {
    if options.num_threads == Some(0) {
        return Err(BatchError::InvalidThreads);
    }

    let n_threads = options
        .num_threads
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1));
    let pool = ThreadPoolBuilder::new().num_threads(n_threads).build()?;

    Ok(pool.install(|| requests.par_iter().map(AggregationRequest::run).collect()))
}
