//! JSON report writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::aggregate::Report;
use crate::error::OutputResult;

/// Write `report` as a pretty-printed JSON object.
///
/// Fields: `total`, `valid_count`, `invalid_count`, `mean` (`null` when absent) and `message`
/// (`null` unless the mean is absent).
///
/// A total that overflowed to infinity is also written as `null`, since JSON has no
/// representation for it. The sum is not overflow-checked.
pub fn write_json_report(path: impl AsRef<Path>, report: &Report) -> OutputResult<()> {
    let file = File::create(path)?;
    write_json_report_to_writer(BufWriter::new(file), report)
}

/// Write `report` as JSON to any writer.
pub fn write_json_report_to_writer<W: Write>(mut writer: W, report: &Report) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
