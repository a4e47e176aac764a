//! Plain-text report writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::aggregate::Report;
use crate::error::OutputResult;

use super::{format_mean, format_number, OutputOptions};

/// Write `report` as human-readable lines.
pub fn write_text_report(path: impl AsRef<Path>, report: &Report, options: &OutputOptions) -> OutputResult<()> {
    let file = File::create(path)?;
    write_text_report_to_writer(BufWriter::new(file), report, options)
}

/// Write `report` as text lines to any writer.
pub fn write_text_report_to_writer<W: Write>(
    mut writer: W,
    report: &Report,
    options: &OutputOptions,
) -> OutputResult<()> {
    writeln!(writer, "Total: {}", format_number(report.total()))?;
    writeln!(writer, "Valid entries: {}", report.valid_count())?;
    writeln!(writer, "Invalid entries: {}", report.invalid_count())?;
    writeln!(writer, "Mean: {}", format_mean(report, options))?;
    if let Some(message) = report.message() {
        writeln!(writer, "Note: {message}")?;
    }
    writer.flush()?;
    Ok(())
}
