//! JSON source adapter.
//!
//! Supported inputs:
//! - A single JSON document: `[1, "2", null]`, `{"values": [1, 2]}`, `42`
//! - Newline-delimited JSON (NDJSON): `1\n[2, 3]\n"4"\n`
//!
//! The selected value is flattened into tokens: arrays recursively, in order; every other value
//! becomes one token. Objects are not descended into, so they end up as
//! [`Token::Composite`] entries.

use std::fs;
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::Token;

/// Options for reading JSON documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Optional JSON pointer (RFC 6901, e.g. `/data/values`) selecting the value to flatten in
    /// each document. `None` flattens the whole document.
    pub pointer: Option<String>,
}

/// Read a JSON/NDJSON file into a flat token sequence.
pub fn read_json_tokens_from_path(path: impl AsRef<Path>, options: &JsonOptions) -> IngestionResult<Vec<Token>> {
    let text = fs::read_to_string(path)?;
    read_json_tokens_from_str(&text, options)
}

/// Read JSON/NDJSON from an in-memory string into a flat token sequence.
pub fn read_json_tokens_from_str(input: &str, options: &JsonOptions) -> IngestionResult<Vec<Token>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IngestionError::SourceShape {
            message: "json input is empty".to_string(),
        });
    }

    let mut tokens = Vec::new();

    // First try parsing as a single JSON document.
    let doc_err = match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(doc) => {
            flatten_into(select(&doc, options, None)?, &mut tokens);
            return Ok(tokens);
        }
        Err(e) => e,
    };

    // Fall back to NDJSON. A first line that fails too means one malformed document, so the
    // document error is returned.
    let mut first = true;
    for (i, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let doc = match serde_json::from_str::<serde_json::Value>(line) {
            Ok(doc) => doc,
            Err(_) if first => return Err(IngestionError::Json(doc_err)),
            Err(e) => {
                return Err(IngestionError::SourceShape {
                    message: format!("invalid ndjson at line {}: {}", i + 1, e),
                });
            }
        };
        first = false;
        flatten_into(select(&doc, options, Some(i + 1))?, &mut tokens);
    }
    Ok(tokens)
}

fn select<'a>(
    doc: &'a serde_json::Value,
    options: &JsonOptions,
    line: Option<usize>,
) -> IngestionResult<&'a serde_json::Value> {
    let Some(pointer) = options.pointer.as_deref() else {
        return Ok(doc);
    };
    doc.pointer(pointer).ok_or_else(|| IngestionError::SourceShape {
        message: match line {
            Some(n) => format!("json pointer '{pointer}' does not resolve at line {n}"),
            None => format!("json pointer '{pointer}' does not resolve"),
        },
    })
}

fn flatten_into(value: &serde_json::Value, out: &mut Vec<Token>) {
    match value {
        serde_json::Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        other => out.push(Token::from(other)),
    }
}
