//! CSV grid validator.

use std::io::Read;
use std::num::IntErrorKind;

use crate::error::{MatrixError, MatrixResult, MatrixViolation};
use crate::types::Grid;

/// The only declared content type accepted for ingestion.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Parse an uploaded body into a validated [`Grid`].
///
/// Rules, checked in this order:
///
/// - `input` must be present and non-empty.
/// - `content_type` must equal [`CSV_CONTENT_TYPE`] exactly. The label is compared, the bytes are
///   not sniffed.
/// - Lines are separated by `\n` (a preceding `\r` is dropped). The first line fixes the column
///   count; every line must have the same number of `,`-separated tokens. Trailing empty tokens
///   are dropped, so `1,2,` has two tokens and `,,` has none.
/// - Every token must be a base-10 integer within the `i32` range.
///
/// The first violation in row-major order is returned. Rows and columns in messages are 1-based.
pub fn parse_csv(input: Option<&[u8]>, content_type: Option<&str>) -> MatrixResult<Grid> {
    let bytes = match input {
        Some(b) if !b.is_empty() => b,
        _ => return Err(MatrixViolation::Empty.into()),
    };

    if content_type != Some(CSV_CONTENT_TYPE) {
        return Err(MatrixError::InvalidFile {
            content_type: content_type.map(str::to_owned),
        });
    }

    let text = String::from_utf8_lossy(bytes);
    let record = RawRecord::split(&text);
    Ok(record.validate()?)
}

/// Read `reader` to the end, then parse it with [`parse_csv`].
pub fn parse_csv_from_reader<R: Read>(
    mut reader: R,
    content_type: Option<&str>,
) -> MatrixResult<Grid> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    parse_csv(Some(buf.as_slice()), content_type)
}

/// Unparsed input: lines, each a list of raw tokens.
struct RawRecord<'a> {
    lines: Vec<Vec<&'a str>>,
}

impl<'a> RawRecord<'a> {
    fn split(text: &'a str) -> Self {
        let lines = text.lines().map(split_tokens).collect();
        Self { lines }
    }

    fn validate(&self) -> Result<Grid, MatrixViolation> {
        let col_count = match self.lines.first() {
            Some(first) => first.len(),
            None => return Err(MatrixViolation::NoRows),
        };
        if col_count == 0 {
            return Err(MatrixViolation::NoColumns);
        }

        let mut cells = Vec::with_capacity(self.lines.len() * col_count);
        for (row_idx0, tokens) in self.lines.iter().enumerate() {
            let row = row_idx0 + 1;
            if tokens.len() != col_count {
                return Err(MatrixViolation::ColumnMismatch {
                    row,
                    expected: col_count,
                    found: tokens.len(),
                });
            }
            for (col_idx0, raw) in tokens.iter().enumerate() {
                cells.push(parse_cell(row, col_idx0 + 1, raw)?);
            }
        }

        Ok(Grid::from_parts(self.lines.len(), col_count, cells))
    }
}

/// Split on `,` and drop trailing empty tokens. A line without any `,` is a single token, even
/// when empty.
fn split_tokens(line: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() > 1 {
        while tokens.last() == Some(&"") {
            tokens.pop();
        }
    }
    tokens
}

fn parse_cell(row: usize, column: usize, raw: &str) -> Result<i32, MatrixViolation> {
    // Parse wide first so out-of-range values are told apart from garbage.
    match raw.parse::<i64>() {
        Ok(v) if v > i64::from(i32::MAX) => Err(MatrixViolation::AboveMaximum { row, column }),
        Ok(v) if v < i64::from(i32::MIN) => Err(MatrixViolation::BelowMinimum { row, column }),
        Ok(v) => Ok(v as i32),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Err(MatrixViolation::AboveMaximum { row, column }),
            IntErrorKind::NegOverflow => Err(MatrixViolation::BelowMinimum { row, column }),
            _ => Err(MatrixViolation::InvalidInteger { row, column }),
        },
    }
}
