//! CSV source adapter.

use std::path::Path;

use crate::error::IngestionResult;
use crate::types::Token;

/// Options for reading delimited text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Skip the first record instead of treating it as data.
    pub has_headers: bool,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_headers: false,
            delimiter: b',',
        }
    }
}

impl CsvOptions {
    /// Options for tab-separated input.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }

    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .flexible(true);
        builder
    }
}

/// Read a CSV file into a flat token sequence.
///
/// Rules:
///
/// - Every cell of every record becomes one [`Token::Text`], in row-major order.
/// - Rows may have different lengths.
/// - Cells are kept verbatim (untrimmed, empty cells included); classification decides what
///   counts as a number.
/// - A cell that is not valid UTF-8 is decoded lossily, so it stays one (invalid) entry instead of
///   failing the file.
pub fn read_csv_tokens_from_path(path: impl AsRef<Path>, options: &CsvOptions) -> IngestionResult<Vec<Token>> {
    let mut rdr = options.reader_builder().from_path(path)?;
    read_csv_tokens_from_reader(&mut rdr)
}

/// Read CSV data from an in-memory string.
pub fn read_csv_tokens_from_str(input: &str, options: &CsvOptions) -> IngestionResult<Vec<Token>> {
    let mut rdr = options.reader_builder().from_reader(input.as_bytes());
    read_csv_tokens_from_reader(&mut rdr)
}

/// Read tokens from an existing CSV reader.
pub fn read_csv_tokens_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> IngestionResult<Vec<Token>> {
    let mut tokens = Vec::new();
    for result in rdr.byte_records() {
        let record = result?;
        tokens.extend(record.iter().map(cell_token));
    }
    Ok(tokens)
}

fn cell_token(cell: &[u8]) -> Token {
    match std::str::from_utf8(cell) {
        Ok(s) => Token::from(s),
        Err(_) => Token::Text(String::from_utf8_lossy(cell).into_owned()),
    }
}
