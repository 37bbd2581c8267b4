//! JSONL (JSON Lines) read/write support for the records sequence (§4.1).
//!
//! Each line is a complete JSON object representing one [`Record`]. This
//! mirrors the teacher's `beads_core::jsonl` module closely: the same
//! skip-blank-lines read behavior, the same full-rewrite write behavior,
//! the same per-line error reporting.

use std::io::{self, BufRead, Write};

use crate::record::Record;

/// Error type for JSONL operations.
#[derive(Debug, thiserror::Error)]
pub enum JsonlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error at line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, JsonlError>;

/// Writes records as JSONL to the given writer.
///
/// Each record is one JSON line followed by `\n`; a trailing `\n` is
/// appended iff `records` is non-empty, and nothing else is ever
/// written -- callers always replace the whole file (§4.1).
pub fn write_jsonl<W: Write>(writer: &mut W, records: &[Record]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)
            .map_err(|e| JsonlError::Json { line: 0, source: e })?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Serializes records to a `String` the way [`write_jsonl`] would write
/// them to a file -- the form the BWT engine stages to `.tmp`.
pub fn to_jsonl_string(records: &[Record]) -> Result<String> {
    let mut buf = Vec::new();
    write_jsonl(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| {
        JsonlError::Io(io::Error::new(io::ErrorKind::InvalidData, e))
    })
}

/// Returns an iterator that reads records from a JSONL reader, skipping
/// blank lines and reporting the 1-based line number on parse failure.
pub fn read_jsonl<R: BufRead>(reader: R) -> JsonlIter<R> {
    JsonlIter {
        reader,
        line_number: 0,
    }
}

/// Reads every record out of a complete JSONL string, eagerly.
pub fn parse_jsonl_str(content: &str) -> Result<Vec<Record>> {
    read_jsonl(content.as_bytes()).collect()
}

pub struct JsonlIter<R> {
    reader: R,
    line_number: usize,
}

impl<R: BufRead> Iterator for JsonlIter<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match serde_json::from_str::<Record>(trimmed) {
                        Ok(record) => return Some(Ok(record)),
                        Err(e) => {
                            return Some(Err(JsonlError::Json {
                                line: self.line_number,
                                source: e,
                            }));
                        }
                    }
                }
                Err(e) => return Some(Err(JsonlError::Io(e))),
            }
        }
    }
}
