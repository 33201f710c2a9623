// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar mark generation.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Brush;
use streamview_core::{Mark, MarkId};

use crate::primitives::filled_rect;
use crate::scale::{ScaleBand, ScaleLinear};

/// Vertical bars over a band scale.
///
/// Generates one rectangle per value, spanning from the scaled baseline to the scaled value.
/// Both scales map into plot-local coordinates; `origin` is the plot's top-left corner on the
/// surface.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Stable-id base; bar `i` uses `id_base + i`.
    pub id_base: u64,
    /// Band scale used for bar positions along x.
    pub band: ScaleBand,
    /// Linear scale used for bar positions along y.
    pub y_scale: ScaleLinear,
    /// Surface position of the plot origin.
    pub origin: Point,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for bars.
    pub fill: Brush,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0` and a default fill (`Brush::default()`).
    pub fn new(id_base: u64, band: ScaleBand, y_scale: ScaleLinear) -> Self {
        Self {
            id_base,
            band,
            y_scale,
            origin: Point::ZERO,
            baseline: 0.0,
            fill: Brush::default(),
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the surface position of the plot origin.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates one bar per value, in band order.
    ///
    /// Values beyond the band count are ignored.
    pub fn marks(&self, values: &[f64]) -> Vec<Mark> {
        let bw = self.band.band_width();
        let y0 = self.y_scale.map(self.baseline);
        values
            .iter()
            .take(self.band.count())
            .enumerate()
            .map(|(i, &v)| {
                let x = self.origin.x + self.band.x(i);
                let y = self.y_scale.map(v);
                let rect = Rect::new(
                    x,
                    self.origin.y + y.min(y0),
                    x + bw,
                    self.origin.y + y.max(y0),
                );
                filled_rect(
                    MarkId::from_raw(self.id_base + i as u64),
                    rect,
                    self.fill.clone(),
                    self.z_index,
                )
            })
            .collect()
    }
}
