// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-margin chart layout.
//!
//! Both charts in the widget use the same arrangement: an outer view of a given size, a
//! margin on each side, and the plot rectangle that remains. Axes hang off the plot edges into
//! the margins.

use kurbo::{Point, Rect, Size};

/// Per-side margins in surface units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Space above the plot.
    pub top: f64,
    /// Space right of the plot.
    pub right: f64,
    /// Space below the plot.
    pub bottom: f64,
    /// Space left of the plot.
    pub left: f64,
}

impl Margin {
    /// Creates margins in CSS order (top, right, bottom, left).
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same margin on every side.
    pub const fn uniform(m: f64) -> Self {
        Self::new(m, m, m, m)
    }

    /// Total horizontal margin.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical margin.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Output of [`ChartLayout::arrange`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds, anchored at the origin.
    pub view: Rect,
    /// The plot rectangle (the view inset by the margins).
    pub plot: Rect,
}

impl ChartLayout {
    /// Insets a view of `size` by `margin`.
    ///
    /// A margin larger than the view collapses the plot to zero width or height instead of
    /// inverting it.
    pub fn arrange(size: Size, margin: Margin) -> Self {
        let view = Rect::from_origin_size(Point::ZERO, size);
        let x0 = margin.left;
        let y0 = margin.top;
        let x1 = (size.width - margin.right).max(x0);
        let y1 = (size.height - margin.bottom).max(y0);
        Self {
            view,
            plot: Rect::new(x0, y0, x1, y1),
        }
    }

    /// Plot width.
    pub fn plot_width(&self) -> f64 {
        self.plot.width()
    }

    /// Plot height.
    pub fn plot_height(&self) -> f64 {
        self.plot.height()
    }

    /// Converts a surface point into plot-local coordinates.
    pub fn to_plot(&self, p: Point) -> Point {
        Point::new(p.x - self.plot.x0, p.y - self.plot.y0)
    }
}
