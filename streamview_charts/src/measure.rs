// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text extents for guide layout.
//!
//! Marks carry unshaped strings. The legend sizes its surface from its widest label, so it
//! asks a [`TextMeasurer`]; hosts with real font metrics can supply their own.

use kurbo::Size;

/// Measures a single line of text.
pub trait TextMeasurer {
    /// The extent of `text` set at `font_size`, in surface units.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

/// Assumes every glyph is 0.6em wide and a line is 1em tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> Size {
        #[allow(
            clippy::cast_precision_loss,
            reason = "labels are far shorter than 2^53 chars"
        )]
        let glyphs = text.chars().count() as f64;
        Size::new(0.6 * font_size * glyphs, font_size)
    }
}
