// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reshaping flat records into a dense date x category table.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::Record;

/// Stacking order for the categories the widget knows about, bottom to top.
pub const DEFAULT_CATEGORY_PRIORITY: &[&str] =
    &["GPT-4", "Gemini", "PaLM-2", "Claude", "LLaMA-3.1"];

/// One row per distinct date, with one value per category (in [`SeriesTable::categories`]
/// order).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedRow {
    /// Date label.
    pub date: String,
    /// Values aligned with the table's categories.
    pub values: Vec<i64>,
}

/// A `(date, value)` pair from a single category's series.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatedValue {
    /// Date label.
    pub date: String,
    /// Value for that date.
    pub value: i64,
}

/// Dense table of normalized rows.
///
/// Invariants:
/// - `rows.len() == dates.len()` and `rows[i].date == dates[i]`,
/// - every row has exactly `categories.len()` values,
/// - dates and categories contain no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesTable {
    dates: Vec<String>,
    categories: Vec<String>,
    rows: Vec<NormalizedRow>,
}

impl SeriesTable {
    /// Builds a table from records, keeping first-seen order for dates and categories.
    ///
    /// Absent `(date, category)` pairs are `0`. When a pair occurs more than once, the first
    /// record wins.
    pub fn from_records(records: &[Record]) -> Self {
        let mut date_index: HashMap<&str, usize> = HashMap::new();
        let mut category_index: HashMap<&str, usize> = HashMap::new();
        let mut dates: Vec<String> = Vec::new();
        let mut categories: Vec<String> = Vec::new();

        for r in records {
            date_index.entry(r.date.as_str()).or_insert_with(|| {
                dates.push(r.date.clone());
                dates.len() - 1
            });
            category_index.entry(r.category.as_str()).or_insert_with(|| {
                categories.push(r.category.clone());
                categories.len() - 1
            });
        }

        let mut cells: Vec<Option<i64>> = vec![None; dates.len() * categories.len()];
        for r in records {
            let (Some(&d), Some(&c)) = (
                date_index.get(r.date.as_str()),
                category_index.get(r.category.as_str()),
            ) else {
                continue;
            };
            let cell = &mut cells[d * categories.len() + c];
            if cell.is_none() {
                *cell = Some(r.value);
            } else {
                log::debug!("normalize: duplicate ({}, {}) ignored", r.date, r.category);
            }
        }

        let rows = dates
            .iter()
            .enumerate()
            .map(|(d, date)| NormalizedRow {
                date: date.clone(),
                values: (0..categories.len())
                    .map(|c| cells[d * categories.len() + c].unwrap_or(0))
                    .collect(),
            })
            .collect();

        Self {
            dates,
            categories,
            rows,
        }
    }

    /// Reorders categories by `priority`.
    ///
    /// Categories named in `priority` come first, in that order; the rest keep their current
    /// relative order after them. Row values are permuted to match.
    pub fn with_priority(mut self, priority: &[&str]) -> Self {
        let rank = |category: &str| {
            priority
                .iter()
                .position(|p| *p == category)
                .unwrap_or(usize::MAX)
        };
        let mut order: Vec<usize> = (0..self.categories.len()).collect();
        // Stable sort keeps first-seen order among unranked categories.
        order.sort_by_key(|&i| rank(&self.categories[i]));

        self.categories = order.iter().map(|&i| self.categories[i].clone()).collect();
        for row in &mut self.rows {
            row.values = order.iter().map(|&i| row.values[i]).collect();
        }
        self
    }

    /// Builds a table from records and applies `priority` in one step.
    pub fn normalize(records: &[Record], priority: &[&str]) -> Self {
        let table = Self::from_records(records).with_priority(priority);
        log::debug!(
            "normalize: {} dates x {} categories",
            table.dates.len(),
            table.categories.len()
        );
        table
    }

    /// Distinct dates in first-seen order.
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Distinct categories in stacking order (bottom first).
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// One row per date.
    pub fn rows(&self) -> &[NormalizedRow] {
        &self.rows
    }

    /// Returns `true` if there are no dates or no categories to draw.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.categories.is_empty()
    }

    /// Position of `category` in stacking order.
    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Value at `(date_index, category_index)`.
    pub fn value(&self, date_index: usize, category_index: usize) -> Option<i64> {
        self.rows
            .get(date_index)
            .and_then(|row| row.values.get(category_index))
            .copied()
    }

    /// The full per-date series of one category, or `None` if the category is unknown.
    pub fn series(&self, category: &str) -> Option<Vec<DatedValue>> {
        let c = self.category_index(category)?;
        Some(
            self.rows
                .iter()
                .map(|row| DatedValue {
                    date: row.date.to_string(),
                    value: row.values[c],
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::{CsvOptions, parse_records};

    fn table(text: &str) -> SeriesTable {
        SeriesTable::from_records(&parse_records(text, &CsvOptions::default()).unwrap())
    }

    #[test]
    fn missing_cells_zero_fill() {
        let t = table("date,A,B\n2024-01,5,\n2024-02,,7");
        assert_eq!(t.dates(), ["2024-01", "2024-02"]);
        assert_eq!(t.categories(), ["A", "B"]);
        assert_eq!(t.rows()[0].values, [5, 0]);
        assert_eq!(t.rows()[1].values, [0, 7]);
    }

    #[test]
    fn short_rows_zero_fill_absent_categories() {
        let t = table("date,A,B,C\n2024-01,1\n2024-02,1,2,3");
        assert_eq!(t.categories(), ["A", "B", "C"]);
        assert_eq!(t.rows()[0].values, [1, 0, 0]);
    }

    #[test]
    fn first_duplicate_wins() {
        let t = table("date,A\n2024-01,1\n2024-01,9");
        assert_eq!(t.dates(), ["2024-01"]);
        assert_eq!(t.value(0, 0), Some(1));
    }

    #[test]
    fn priority_puts_known_categories_first() {
        let t = table("date,Gemini,Other,GPT-4,Zeta\nd1,1,2,3,4")
            .with_priority(DEFAULT_CATEGORY_PRIORITY);
        assert_eq!(t.categories(), ["GPT-4", "Gemini", "Other", "Zeta"]);
        assert_eq!(t.rows()[0].values, [3, 1, 2, 4]);
    }

    #[test]
    fn gpt4_stacks_below_gemini_regardless_of_column_order() {
        for text in ["date,Gemini,GPT-4\nd,1,2", "date,GPT-4,Gemini\nd,2,1"] {
            let t = SeriesTable::normalize(
                &parse_records(text, &CsvOptions::default()).unwrap(),
                DEFAULT_CATEGORY_PRIORITY,
            );
            assert_eq!(t.categories(), ["GPT-4", "Gemini"]);
            assert_eq!(t.rows()[0].values, [2, 1]);
        }
    }

    #[test]
    fn series_reads_one_category() {
        let t = table("date,A,B\nd1,1,2\nd2,3,4");
        let s = t.series("B").unwrap();
        assert_eq!(
            s,
            [
                DatedValue {
                    date: "d1".to_string(),
                    value: 2
                },
                DatedValue {
                    date: "d2".to_string(),
                    value: 4
                },
            ]
        );
        assert!(t.series("missing").is_none());
    }

    #[test]
    fn empty_input_is_empty_table() {
        let t = table("");
        assert!(t.is_empty());
        assert!(t.rows().is_empty());
        let header_only = table("date,A,B");
        assert!(header_only.is_empty());
    }
}
