// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared category -> color lookup.
//!
//! The streamgraph layers, legend swatches and tooltip bars all resolve colors through one
//! [`CategoryPalette`], so a category is painted the same everywhere.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use peniko::Color;

/// The ten-color categorical fallback palette.
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgba8(0x1f, 0x77, 0xb4, 0xff),
    Color::from_rgba8(0xff, 0x7f, 0x0e, 0xff),
    Color::from_rgba8(0x2c, 0xa0, 0x2c, 0xff),
    Color::from_rgba8(0xd6, 0x27, 0x28, 0xff),
    Color::from_rgba8(0x94, 0x67, 0xbd, 0xff),
    Color::from_rgba8(0x8c, 0x56, 0x4b, 0xff),
    Color::from_rgba8(0xe3, 0x77, 0xc2, 0xff),
    Color::from_rgba8(0x7f, 0x7f, 0x7f, 0xff),
    Color::from_rgba8(0xbc, 0xbd, 0x22, 0xff),
    Color::from_rgba8(0x17, 0xbe, 0xcf, 0xff),
];

/// Named colors for the well-known categories.
pub const DEFAULT_CATEGORY_COLORS: [(&str, Color); 5] = [
    ("GPT-4", Color::from_rgba8(0xe4, 0x1a, 0x1c, 0xff)),
    ("Gemini", Color::from_rgba8(0x37, 0x7e, 0xb8, 0xff)),
    ("PaLM-2", Color::from_rgba8(0x4d, 0xaf, 0x4a, 0xff)),
    ("Claude", Color::from_rgba8(0x98, 0x4e, 0xa3, 0xff)),
    ("LLaMA-3.1", Color::from_rgba8(0xff, 0x7f, 0x00, 0xff)),
];

/// Category colors with an ordinal fallback.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryPalette {
    named: Vec<(String, Color)>,
    fallback: Vec<Color>,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self {
            named: DEFAULT_CATEGORY_COLORS
                .iter()
                .map(|&(name, color)| (String::from(name), color))
                .collect(),
            fallback: CATEGORY10.to_vec(),
        }
    }
}

impl CategoryPalette {
    /// Creates a palette with no named colors and the [`CATEGORY10`] fallback.
    pub fn new() -> Self {
        Self {
            named: Vec::new(),
            fallback: CATEGORY10.to_vec(),
        }
    }

    /// Assigns `color` to `category`, replacing any previous assignment.
    pub fn with_color(mut self, category: impl Into<String>, color: Color) -> Self {
        let category = category.into();
        match self.named.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 = color,
            None => self.named.push((category, color)),
        }
        self
    }

    /// Replaces the fallback palette. An empty list keeps the current one.
    pub fn with_fallback(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        let colors: Vec<Color> = colors.into_iter().collect();
        if !colors.is_empty() {
            self.fallback = colors;
        }
        self
    }

    /// The named color of `category`, if any.
    pub fn named(&self, category: &str) -> Option<Color> {
        self.named
            .iter()
            .find(|(name, _)| name == category)
            .map(|&(_, color)| color)
    }

    /// Resolves the color of `category`, which sits at `ordinal` in stacking order.
    ///
    /// Unnamed categories take `fallback[ordinal % fallback.len()]`.
    pub fn color(&self, category: &str, ordinal: usize) -> Color {
        self.named(category)
            .unwrap_or_else(|| self.fallback[ordinal % self.fallback.len()])
    }
}
