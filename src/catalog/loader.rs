//! CSV loader
//!
//! Splits the data source into rows of trimmed fields.
//!
//! ## Format
//! - The first line is a header and is discarded
//! - `,` separates fields outside quotes
//! - `"` opens a quoted section anywhere in a field; inside it `""` is a
//!   literal quote and a lone `"` closes the section
//! - A line break inside quotes becomes `\n` in the field
//! - Blank lines between rows are skipped
//! - Bytes that are not valid UTF-8 are replaced with U+FFFD

use std::io::{self, BufRead};

use crate::error::{CatalogError, Result};

/// Number of columns a row must carry
pub const FIELD_COUNT: usize = 6;

/// A parsed row with the line it started on (1-based, header is line 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Read every data row from a CSV source
///
/// Fails on an empty source (no header), on I/O errors, and when the input
/// ends inside a quoted field.
pub fn read_rows<R: BufRead>(mut reader: R) -> Result<Vec<CsvRow>> {
    let mut buf = Vec::new();

    match read_lossy_line(&mut reader, &mut buf) {
        Ok(Some(_header)) => {}
        Ok(None) => {
            return Err(CatalogError::Load(
                "data source is empty (missing header row)".to_string(),
            ))
        }
        Err(e) => return Err(CatalogError::Load(format!("failed to read header: {}", e))),
    }

    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut row_start = 0;
    let mut line_no = 1;

    loop {
        line_no += 1;
        let line = match read_lossy_line(&mut reader, &mut buf) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(CatalogError::Load(format!("line {}: {}", line_no, e))),
        };

        if !in_quotes {
            if line.trim().is_empty() {
                continue;
            }
            row_start = line_no;
        }

        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if in_quotes {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    current.push(c);
                }
            } else {
                match c {
                    '"' => in_quotes = true,
                    ',' => fields.push(take_field(&mut current)),
                    _ => current.push(c),
                }
            }
        }

        if in_quotes {
            // Quoted field continues on the next physical line
            current.push('\n');
        } else {
            fields.push(take_field(&mut current));
            rows.push(CsvRow {
                line: row_start,
                fields: std::mem::take(&mut fields),
            });
        }
    }

    if in_quotes {
        return Err(CatalogError::Load(format!(
            "line {}: unterminated quoted field",
            row_start
        )));
    }

    Ok(rows)
}

/// Next physical line without its `\n` or `\r\n`, decoded lossily
fn read_lossy_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf[..]).into_owned()))
}

fn take_field(current: &mut String) -> String {
    let field = current.trim().to_string();
    current.clear();
    field
}
