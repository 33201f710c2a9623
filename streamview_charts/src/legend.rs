// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A vertical list of color swatches with text labels, one row per category in stacking order.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use streamview_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::primitives::{LabelStyle, filled_rect};
use crate::z_order;

/// A simple legend row item.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// An unpositioned legend specification (swatches + labels).
///
/// Row `i` occupies `[i * row_height, (i + 1) * row_height)` below the origin. The swatch sits
/// at the row's top-left corner; the label starts `label_dx` to the right with its baseline
/// `label_dy` below the row top.
#[derive(Clone, Debug)]
pub struct LegendSwatchesSpec {
    /// Stable-id base; row `i` uses `id_base + 2i` for its swatch and `id_base + 2i + 1` for
    /// its label.
    pub id_base: u64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Row pitch.
    pub row_height: f64,
    /// Label x offset from the row origin.
    pub label_dx: f64,
    /// Label baseline offset from the row top.
    pub label_dy: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Lower bound on the measured width.
    pub min_width: f64,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSwatchesSpec {
    /// Creates a legend with 30 px rows, 20 px swatches and a 200 px minimum width.
    pub fn new(id_base: u64, items: Vec<LegendItem>) -> Self {
        Self {
            id_base,
            swatch_size: 20.0,
            row_height: 30.0,
            label_dx: 30.0,
            label_dy: 15.0,
            font_size: 12.0,
            text_fill: css::BLACK.into(),
            min_width: 200.0,
            items,
        }
    }

    /// Set the label text paint.
    pub fn with_text_fill(mut self, text_fill: impl Into<Brush>) -> Self {
        self.text_fill = text_fill.into();
        self
    }

    /// Set the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the swatch size.
    pub fn with_swatch_size(mut self, swatch_size: f64) -> Self {
        self.swatch_size = swatch_size;
        self
    }

    /// Sets the row pitch.
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height.max(0.0);
        self
    }

    /// Sets the minimum measured width.
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width.max(0.0);
        self
    }

    /// Id of the swatch in row `row`.
    pub fn swatch_id(&self, row: usize) -> MarkId {
        MarkId::from_raw(self.id_base + 2 * row as u64)
    }

    /// Id of the label in row `row`.
    pub fn label_id(&self, row: usize) -> MarkId {
        self.swatch_id(row).offset(1)
    }

    /// Measures the legend: `min_width` or the widest row, whichever is larger, by one row
    /// pitch per item.
    pub fn measure(&self, measurer: &impl TextMeasurer) -> Size {
        let widest = self
            .items
            .iter()
            .map(|item| {
                let w = measurer.measure(&item.label, self.font_size).width;
                (self.label_dx + w).max(self.swatch_size)
            })
            .fold(0.0_f64, f64::max);
        #[allow(
            clippy::cast_precision_loss,
            reason = "legends hold a handful of rows"
        )]
        let height = self.items.len() as f64 * self.row_height;
        Size::new(widest.max(self.min_width), height)
    }

    /// Generates marks for this legend with its top-left corner at `origin`.
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        let label_style = LabelStyle::default()
            .with_font_size(self.font_size)
            .with_fill(self.text_fill.clone())
            .with_anchor(TextAnchor::Start)
            .with_baseline(TextBaseline::Alphabetic)
            .with_z_index(z_order::LEGEND_LABELS);

        let mut out = Vec::with_capacity(self.items.len() * 2);
        for (i, item) in self.items.iter().enumerate() {
            #[allow(
                clippy::cast_precision_loss,
                reason = "legends hold a handful of rows"
            )]
            let y = origin.y + i as f64 * self.row_height;

            let swatch = Rect::from_origin_size(
                Point::new(origin.x, y),
                Size::new(self.swatch_size, self.swatch_size),
            );
            out.push(filled_rect(
                self.swatch_id(i),
                swatch,
                item.fill.clone(),
                z_order::LEGEND_SWATCHES,
            ));
            out.push(label_style.label(
                self.label_id(i),
                Point::new(origin.x + self.label_dx, y + self.label_dy),
                item.label.clone(),
            ));
        }
        out
    }
}
