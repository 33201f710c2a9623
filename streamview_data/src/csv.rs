// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSV ingestion: wide `date,<category>...` text into flat records.
//!
//! The format is deliberately small: the first line is a header whose first cell labels the
//! date column and whose remaining cells name categories; every following line is
//! `date,value1,value2,...` aligned positionally to the header. Fields are split on a single
//! delimiter character. There is no quoting or escaping and no header validation.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use smallvec::SmallVec;

/// One `(date, category, value)` observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Date label, verbatim from the first column.
    pub date: String,
    /// Category label, from the header cell above the value.
    pub category: String,
    /// Parsed count.
    pub value: i64,
}

/// What to do with a value cell that is empty or not an integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellPolicy {
    /// Emit a record with value `0`.
    #[default]
    Zero,
    /// Emit no record for the cell; the normalizer zero-fills the gap.
    Skip,
    /// Fail the whole parse with [`CsvError::InvalidValue`].
    Reject,
}

/// Options for [`parse_records`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: char,
    /// Policy for empty or non-numeric value cells.
    pub cell_policy: CellPolicy,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            cell_policy: CellPolicy::Zero,
        }
    }
}

impl CsvOptions {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the policy for empty or non-numeric cells.
    pub fn with_cell_policy(mut self, cell_policy: CellPolicy) -> Self {
        self.cell_policy = cell_policy;
        self
    }
}

/// Errors returned by [`parse_records`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvError {
    /// A value cell is empty or not an integer, and the policy is [`CellPolicy::Reject`].
    #[error("line {line}, column {column}: {text:?} is not an integer")]
    InvalidValue {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
        /// The offending cell, trimmed.
        text: String,
    },
}

type Fields<'a> = SmallVec<[&'a str; 8]>;

fn split_fields(line: &str, delimiter: char) -> Fields<'_> {
    line.split(delimiter).map(str::trim).collect()
}

/// Parses one value cell.
///
/// Leading/trailing whitespace is ignored. Decimal cells truncate toward zero. Returns `None`
/// for empty or non-numeric cells.
pub fn parse_cell(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Some(v);
    }
    let v = text.parse::<f64>().ok()?;
    if !v.is_finite() {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "finite values truncate toward zero and saturate at the i64 range"
    )]
    Some(v as i64)
}

/// Parses CSV text into records, one per value cell of the body.
///
/// - The text is trimmed before splitting into lines, so leading/trailing blank lines vanish.
/// - A row with fewer cells than the header yields fewer records; nothing is padded.
/// - Cells beyond the header width are ignored.
/// - Empty or non-numeric cells follow `options.cell_policy`.
///
/// Empty input yields an empty record list.
pub fn parse_records(text: &str, options: &CsvOptions) -> Result<Vec<Record>, CsvError> {
    let text = text.trim();
    if text.is_empty() {
        log::debug!("csv: empty input");
        return Ok(Vec::new());
    }

    let mut lines = text.split('\n');
    let header = split_fields(lines.next().unwrap_or_default(), options.delimiter);
    let width = header.len();

    let mut out = Vec::new();
    for (i, line) in lines.enumerate() {
        let line_no = i + 2;
        let fields = split_fields(line, options.delimiter);
        let date = fields.first().copied().unwrap_or_default();
        if fields.len() > width {
            log::warn!(
                "csv: line {line_no} has {} cells but the header has {width}; extra cells ignored",
                fields.len()
            );
        }

        for (column, cell) in fields.iter().copied().enumerate().take(width).skip(1) {
            let value = match parse_cell(cell) {
                Some(v) => v,
                None => match options.cell_policy {
                    CellPolicy::Zero => {
                        if !cell.is_empty() {
                            log::warn!(
                                "csv: line {line_no}, column {}: {cell:?} is not an integer, using 0",
                                column + 1
                            );
                        }
                        0
                    }
                    CellPolicy::Skip => continue,
                    CellPolicy::Reject => {
                        return Err(CsvError::InvalidValue {
                            line: line_no,
                            column: column + 1,
                            text: cell.to_string(),
                        });
                    }
                },
            };
            out.push(Record {
                date: date.to_string(),
                category: header[column].to_string(),
                value,
            });
        }
    }

    log::debug!(
        "csv: parsed {} records over {} categories",
        out.len(),
        width.saturating_sub(1)
    );
    Ok(out)
}
