// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget errors.

extern crate alloc;

use alloc::string::String;

use streamview_data::CsvError;

/// Errors returned by [`StreamGraphWidget`](crate::StreamGraphWidget) file handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// The selected file does not have a `.csv` extension.
    #[error("{name:?} is not a .csv file")]
    UnsupportedFile {
        /// The rejected file name.
        name: String,
    },
    /// The file contents could not be parsed.
    #[error("invalid CSV: {0}")]
    Csv(#[from] CsvError),
}
