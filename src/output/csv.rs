//! CSV report writer.

use std::io::Write;
use std::path::Path;

use crate::aggregate::Report;
use crate::error::OutputResult;

use super::{format_mean, format_number, OutputOptions};

/// Write `report` as `label,value` rows to a CSV file.
///
/// Rows, in order: `total`, `valid_count`, `invalid_count`, `mean` (or
/// [`OutputOptions::missing_mean`]) and, when present, `message`.
pub fn write_csv_report(path: impl AsRef<Path>, report: &Report, options: &OutputOptions) -> OutputResult<()> {
    let wtr = csv::Writer::from_path(path)?;
    write_rows(wtr, report, options)
}

/// Write `report` as CSV rows to any writer.
pub fn write_csv_report_to_writer<W: Write>(writer: W, report: &Report, options: &OutputOptions) -> OutputResult<()> {
    write_rows(csv::Writer::from_writer(writer), report, options)
}

fn write_rows<W: Write>(mut wtr: csv::Writer<W>, report: &Report, options: &OutputOptions) -> OutputResult<()> {
    wtr.write_record(["total", format_number(report.total()).as_str()])?;
    wtr.write_record(["valid_count", report.valid_count().to_string().as_str()])?;
    wtr.write_record(["invalid_count", report.invalid_count().to_string().as_str()])?;
    wtr.write_record(["mean", format_mean(report, options).as_str()])?;
    if let Some(message) = report.message() {
        wtr.write_record(["message", message])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_csv_report_to_writer;
    use crate::aggregate::{aggregate, Report};
    use crate::output::OutputOptions;
    use crate::types::Token;

    fn render(report: &Report, options: &OutputOptions) -> String {
        let mut buf = Vec::new();
        write_csv_report_to_writer(&mut buf, report, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_all_rows() {
        let report = aggregate(&[Token::Int(10), Token::Text("abc".to_string()), Token::Float(20.5)]);
        assert_eq!(
            render(&report, &OutputOptions::default()),
            "total,30.5\nvalid_count,2\ninvalid_count,1\nmean,15.25\n"
        );
    }

    #[test]
    fn missing_mean_uses_placeholder_and_message() {
        let opts = OutputOptions {
            missing_mean: "n/a".to_string(),
            ..Default::default()
        };
        assert_eq!(
            render(&Report::empty(), &opts),
            "total,0\nvalid_count,0\ninvalid_count,0\nmean,n/a\nmessage,no valid data to compute an average\n"
        );
    }
}
