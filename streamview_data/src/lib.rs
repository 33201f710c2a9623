// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data pipeline for streamview.
//!
//! This crate turns CSV text into the stacked layers a streamgraph renders:
//! - [`parse_records`] splits `date,<category>...` text into flat [`Record`]s,
//! - [`SeriesTable`] reshapes records into one dense row per date, with categories in a fixed
//!   priority order, and
//! - [`StackLayout`] computes per-category baselines/tops (D3-style offsets, including the
//!   streamgraph "wiggle").
//!
//! Everything is a single-pass, full-recompute transform; there is no incremental state.

#![no_std]

extern crate alloc;

mod csv;
mod normalize;
mod stack;

pub use csv::{CellPolicy, CsvError, CsvOptions, Record, parse_cell, parse_records};
pub use normalize::{DEFAULT_CATEGORY_PRIORITY, DatedValue, NormalizedRow, SeriesTable};
pub use stack::{StackLayout, StackOffset, StackPoint, StackedLayer, stack_extent};
