// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The streamgraph chart: stacked, smoothed layers over a point scale of dates.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{BezPath, Point, Shape, Size};
use peniko::Color;
use streamview_core::Mark;
use streamview_data::{
    DEFAULT_CATEGORY_PRIORITY, SeriesTable, StackLayout, StackOffset, stack_extent,
};

use crate::axis::{AxisSpec, AxisStyle};
use crate::layout::{ChartLayout, Margin};
use crate::legend::{LegendItem, LegendSwatchesSpec};
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::palette::CategoryPalette;
use crate::scale::{ScaleLinear, ScalePoint};
use crate::stream_mark::StreamMarkSpec;

// Each component owns a 2^32-wide id range, so no date or category count can make two
// components share an id.

/// Id base of the stream layers (`+ stack index`).
pub const LAYER_ID_BASE: u64 = 1 << 32;
/// Id base of the date axis.
pub const DATE_AXIS_ID_BASE: u64 = 2 << 32;
/// Id base of the legend.
pub const LEGEND_ID_BASE: u64 = 3 << 32;

/// Configuration of the streamgraph chart and its legend.
#[derive(Clone, Debug)]
pub struct StreamgraphSpec {
    /// Outer chart size.
    pub size: Size,
    /// Space between the chart edge and the plot.
    pub margin: Margin,
    /// Stack baseline offset.
    pub offset: StackOffset,
    /// Opacity of every layer.
    pub layer_opacity: f64,
    /// Category colors.
    pub palette: CategoryPalette,
    /// Date axis styling.
    pub axis_style: AxisStyle,
    /// Legend label font size.
    pub legend_font_size: f64,
    /// Categories the legend may list, top row first. Only those present in the data are shown.
    pub legend_order: Vec<String>,
}

impl Default for StreamgraphSpec {
    fn default() -> Self {
        Self {
            size: Size::new(800.0, 500.0),
            margin: Margin::new(20.0, 20.0, 30.0, 50.0),
            offset: StackOffset::Wiggle,
            layer_opacity: 0.9,
            palette: CategoryPalette::default(),
            axis_style: AxisStyle::default(),
            legend_font_size: 12.0,
            legend_order: DEFAULT_CATEGORY_PRIORITY
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl StreamgraphSpec {
    /// Creates an 800x500 wiggle streamgraph with the default palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the outer chart size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets the margins around the plot.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the stack offset.
    pub fn with_offset(mut self, offset: StackOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the layer opacity.
    pub fn with_layer_opacity(mut self, opacity: f64) -> Self {
        self.layer_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets the category palette.
    pub fn with_palette(mut self, palette: CategoryPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the date axis style.
    pub fn with_axis_style(mut self, style: AxisStyle) -> Self {
        self.axis_style = style;
        self
    }

    /// Sets the categories the legend may list.
    pub fn with_legend_order<S: Into<String>>(
        mut self,
        order: impl IntoIterator<Item = S>,
    ) -> Self {
        self.legend_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Renders `table` with heuristic text measurement.
    ///
    /// Returns `None` when the table has no dates or no categories.
    pub fn render(&self, table: &SeriesTable) -> Option<StreamgraphFrame> {
        self.render_measured(table, &HeuristicTextMeasurer)
    }

    /// Renders `table`, measuring legend labels with `measurer`.
    pub fn render_measured(
        &self,
        table: &SeriesTable,
        measurer: &impl TextMeasurer,
    ) -> Option<StreamgraphFrame> {
        self.render_with_legend(table, &self.legend_order, measurer)
    }

    /// Renders `table` with `legend_order` in place of [`Self::legend_order`].
    ///
    /// Categories missing from `legend_order` are drawn but not listed in the legend.
    pub fn render_with_legend(
        &self,
        table: &SeriesTable,
        legend_order: &[String],
        measurer: &impl TextMeasurer,
    ) -> Option<StreamgraphFrame> {
        if table.is_empty() {
            log::debug!("streamgraph: empty table, nothing to draw");
            return None;
        }
        let layout = ChartLayout::arrange(self.size, self.margin);
        let origin = layout.plot.origin();
        let dates = table.dates().len();

        let layers = StackLayout::new().with_offset(self.offset).layers(table);
        let (lo, hi) = stack_extent(&layers).unwrap_or((0.0, 0.0));

        let x_scale = ScalePoint::new((0.0, layout.plot_width()), dates);
        let y_scale = ScaleLinear::new((lo, hi), (layout.plot_height(), 0.0));
        let streams = StreamMarkSpec::new(LAYER_ID_BASE, x_scale, y_scale)
            .with_origin(origin)
            .with_opacity(self.layer_opacity);

        let mut chart_marks = Vec::with_capacity(layers.len() + 2 * dates + 1);
        let mut regions = Vec::with_capacity(layers.len());
        for layer in &layers {
            let color = self.palette.color(&layer.category, layer.index);
            let path = streams.path(layer);
            chart_marks.push(streams.mark(layer, color));
            regions.push(LayerRegion {
                category: layer.category.clone(),
                index: layer.index,
                color,
                path,
            });
        }

        let axis = AxisSpec::bottom(DATE_AXIS_ID_BASE, x_scale)
            .with_labels(table.dates().iter().cloned())
            .with_style(self.axis_style.clone());
        chart_marks.extend(axis.marks(Point::new(layout.plot.x0, layout.plot.y1)));

        let legend_items: Vec<LegendItem> = legend_order
            .iter()
            .filter_map(|name| {
                let region = regions.iter().find(|r| &r.category == name)?;
                Some(LegendItem::solid(name.clone(), region.color))
            })
            .collect();
        let legend = LegendSwatchesSpec::new(LEGEND_ID_BASE, legend_items)
            .with_font_size(self.legend_font_size);
        let legend_size = legend.measure(measurer);
        let legend_marks = legend.marks(Point::ZERO);

        log::debug!(
            "streamgraph: {} layers over {dates} dates, y extent [{lo}, {hi}]",
            regions.len()
        );

        Some(StreamgraphFrame {
            layout,
            date_count: dates,
            chart_marks,
            legend_marks,
            legend_size,
            layers: regions,
        })
    }
}

/// The hoverable area of one rendered layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerRegion {
    /// Category label.
    pub category: String,
    /// Stack index (0 is the bottom layer).
    pub index: usize,
    /// Resolved fill color.
    pub color: Color,
    /// Area outline in chart-surface coordinates.
    pub path: BezPath,
}

/// One rendered streamgraph: marks for the chart and legend surfaces plus hit regions.
#[derive(Clone, Debug)]
pub struct StreamgraphFrame {
    /// Chart view and plot rectangles.
    pub layout: ChartLayout,
    /// Number of dates on the x axis.
    pub date_count: usize,
    /// Layers and date axis.
    pub chart_marks: Vec<Mark>,
    /// Legend swatches and labels, positioned at the legend surface origin.
    pub legend_marks: Vec<Mark>,
    /// Measured legend surface size.
    pub legend_size: Size,
    /// Hit regions in stack order (bottom first).
    pub layers: Vec<LayerRegion>,
}

impl StreamgraphFrame {
    /// The top-most layer containing `p` (chart-surface coordinates).
    pub fn hit_test(&self, p: Point) -> Option<&LayerRegion> {
        self.layers.iter().rev().find(|l| l.path.contains(p))
    }

    /// The layer of `category`, if it was rendered.
    pub fn layer(&self, category: &str) -> Option<&LayerRegion> {
        self.layers.iter().find(|l| l.category == category)
    }

    /// The date index nearest to the chart-surface x coordinate of `p`.
    pub fn nearest_date_index(&self, p: Point) -> usize {
        let local = self.layout.to_plot(p);
        nearest_index(local.x, self.layout.plot_width(), self.date_count)
    }
}

/// Maps a plot-local x coordinate to the nearest of `count` evenly spaced date positions
/// spanning `[0, width]`.
///
/// Computes `round(x / width * (count - 1))` clamped to `[0, count - 1]`. Degenerate inputs
/// (no dates, zero width, NaN) give 0.
pub fn nearest_index(x: f64, width: f64, count: usize) -> usize {
    if count <= 1 || width.is_nan() || width <= 0.0 || x.is_nan() {
        return 0;
    }
    let last = count - 1;
    #[allow(
        clippy::cast_precision_loss,
        reason = "date counts are far below 2^53"
    )]
    let t = (x / width * last as f64).round();
    if t <= 0.0 {
        0
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "t is positive and clamped below"
        )]
        let i = t as usize;
        i.min(last)
    }
}
