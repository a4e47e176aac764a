//! Command-line front end: aggregate one or more CSV/JSON sources and write or print the reports.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use rust_value_aggregation::{OutputResult, Report};
use rust_value_aggregation::batch::{run_batch, AggregationRequest, BatchOptions};
use rust_value_aggregation::ingestion::{CsvOptions, IngestionOptions, JsonOptions, SourceFormat};
use rust_value_aggregation::observability::{
    AggregationObserver, CompositeObserver, FileObserver, TracingObserver,
};
use rust_value_aggregation::output::{write_report, write_report_to_writer, OutputFormat, OutputOptions};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    Csv,
    Tsv,
    Json,
}

impl From<InputFormat> for SourceFormat {
    fn from(f: InputFormat) -> Self {
        match f {
            InputFormat::Csv => SourceFormat::Csv,
            InputFormat::Tsv => SourceFormat::Tsv,
            InputFormat::Json => SourceFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Csv,
    Json,
    Text,
}

impl From<ReportFormat> for OutputFormat {
    fn from(f: ReportFormat) -> Self {
        match f {
            ReportFormat::Csv => OutputFormat::Csv,
            ReportFormat::Json => OutputFormat::Json,
            ReportFormat::Text => OutputFormat::Text,
        }
    }
}

/// Sum, count and average the numeric values of CSV/JSON files.
///
/// Entries that are not numbers are counted as invalid and logged at `warn`.
#[derive(Debug, Parser)]
#[command(name = "rust-value-aggregation", version, about, long_about = None)]
struct Cli {
    /// Input files (.csv, .tsv, .json, .ndjson)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Input format; inferred from each file extension when omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Treat the first CSV record as a header row
    #[arg(long)]
    has_headers: bool,

    /// JSON pointer selecting the values inside each JSON document (e.g. /data/values)
    #[arg(long)]
    pointer: Option<String>,

    /// Write the report here (single input only); prints to stdout otherwise
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Report format; inferred from the output extension when omitted, text on stdout
    #[arg(long, value_enum)]
    output_format: Option<ReportFormat>,

    /// Also append invalid entries and failures to this log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Worker threads used when several inputs are given
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    if cli.output.is_some() && cli.inputs.len() > 1 {
        tracing::error!("--output can only be used with a single input");
        return ExitCode::FAILURE;
    }

    let observer: Arc<dyn AggregationObserver> = match &cli.log_file {
        Some(path) => {
            let observers: Vec<Arc<dyn AggregationObserver>> =
                vec![Arc::new(TracingObserver), Arc::new(FileObserver::new(path))];
            Arc::new(CompositeObserver::new(observers))
        }
        None => Arc::new(TracingObserver),
    };

    let options = IngestionOptions {
        format: cli.format.map(SourceFormat::from),
        csv: CsvOptions {
            has_headers: cli.has_headers,
            ..Default::default()
        },
        json: JsonOptions {
            pointer: cli.pointer.clone(),
        },
        observer: Some(observer),
        ..Default::default()
    };

    let requests: Vec<AggregationRequest> = cli
        .inputs
        .iter()
        .map(|path| AggregationRequest::new(path.clone(), options.clone()))
        .collect();

    let reports = match run_batch(&requests, &BatchOptions { num_threads: cli.threads }) {
        Ok(reports) => reports,
        Err(e) => {
            tracing::error!(error = %e, "cannot start aggregation");
            return ExitCode::FAILURE;
        }
    };

    let output_options = OutputOptions {
        format: cli.output_format.map(OutputFormat::from),
        ..Default::default()
    };

    if let Some(path) = &cli.output {
        let Some(report) = reports.first() else {
            return ExitCode::FAILURE;
        };
        if let Err(e) = write_report(path, report, &output_options) {
            tracing::error!(path = %path.display(), error = %e, "failed to write report");
            return ExitCode::FAILURE;
        }
        tracing::info!(path = %path.display(), "report written");
        return ExitCode::SUCCESS;
    }

    if let Err(e) = print_reports(&requests, &reports, &output_options) {
        tracing::error!(error = %e, "failed to print report");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_reports(requests: &[AggregationRequest], reports: &[Report], options: &OutputOptions) -> OutputResult<()> {
    let format = options.format.unwrap_or(OutputFormat::Text);
    let mut out = io::stdout().lock();
    for (request, report) in requests.iter().zip(reports) {
        if requests.len() > 1 {
            writeln!(out, "== {}", request.path.display())?;
        }
        write_report_to_writer(&mut out, report, format, options)?;
    }
    Ok(())
}
