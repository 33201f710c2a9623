// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hover tooltip: a small bar chart of one category's series, and its placement next to
//! the pointer.

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;

use kurbo::{Point, Size};
use peniko::{Brush, Color};
use streamview_core::{Mark, MarkId, TextAnchor, TextBaseline};
use streamview_data::DatedValue;

use crate::axis::{AxisSpec, AxisStyle};
use crate::bar_mark::BarMarkSpec;
use crate::layout::{ChartLayout, Margin};
use crate::primitives::LabelStyle;
use crate::scale::{ScaleBand, ScaleLinear};
use crate::z_order;

// One 2^32-wide id range per component, as in the streamgraph.

/// Id base of the tooltip bars (`+ date index`).
pub const BAR_ID_BASE: u64 = 1 << 32;
/// Id base of the tooltip date axis.
pub const DATE_AXIS_ID_BASE: u64 = 2 << 32;
/// Id base of the tooltip value axis.
pub const VALUE_AXIS_ID_BASE: u64 = 3 << 32;
/// Id of the tooltip title.
pub const TITLE_ID: u64 = 4 << 32;

/// Configuration of the tooltip bar chart.
#[derive(Clone, Debug)]
pub struct TooltipSpec {
    /// Outer tooltip size.
    pub size: Size,
    /// Space between the tooltip edge and the plot.
    pub margin: Margin,
    /// Band padding (inner and outer), in band steps.
    pub band_padding: f64,
    /// Date label rotation in degrees.
    pub label_angle: f64,
    /// Date label font size.
    pub label_font_size: f64,
    /// Approximate number of value ticks.
    pub value_tick_count: usize,
    /// Title font size.
    pub title_font_size: f64,
    /// Distance of the title baseline above the plot.
    pub title_gap: f64,
    /// Axis styling.
    pub axis_style: AxisStyle,
    /// Distance between the pointer and the tooltip corner.
    pub pointer_offset: f64,
}

impl Default for TooltipSpec {
    fn default() -> Self {
        Self {
            size: Size::new(200.0, 150.0),
            margin: Margin::new(20.0, 10.0, 30.0, 40.0),
            band_padding: 0.2,
            label_angle: -45.0,
            label_font_size: 8.0,
            value_tick_count: 10,
            title_font_size: 12.0,
            title_gap: 5.0,
            axis_style: AxisStyle::default(),
            pointer_offset: 15.0,
        }
    }
}

impl TooltipSpec {
    /// Creates a 200x150 tooltip spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the outer tooltip size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Sets the margins around the plot.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the band padding.
    pub fn with_band_padding(mut self, padding: f64) -> Self {
        self.band_padding = padding;
        self
    }

    /// Sets the date label rotation in degrees.
    pub fn with_label_angle(mut self, angle: f64) -> Self {
        self.label_angle = angle;
        self
    }

    /// Sets the distance between the pointer and the tooltip.
    pub fn with_pointer_offset(mut self, offset: f64) -> Self {
        self.pointer_offset = offset;
        self
    }

    /// Draws the bar chart of `values` for `category`, filled with `color`.
    ///
    /// The value scale spans `0..=max(values)`. An empty series draws only the axes and title.
    pub fn marks(&self, category: &str, values: &[DatedValue], color: Color) -> Vec<Mark> {
        let layout = ChartLayout::arrange(self.size, self.margin);
        let plot = layout.plot;

        #[allow(
            clippy::cast_precision_loss,
            reason = "hashtag counts are far below 2^53"
        )]
        let max = values.iter().map(|d| d.value as f64).fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        });
        let max = max.unwrap_or(0.0);

        let band = ScaleBand::new((0.0, layout.plot_width()), values.len())
            .with_padding(self.band_padding, self.band_padding);
        let y_scale = ScaleLinear::new((0.0, max), (layout.plot_height(), 0.0));

        #[allow(
            clippy::cast_precision_loss,
            reason = "hashtag counts are far below 2^53"
        )]
        let heights: Vec<f64> = values.iter().map(|d| d.value as f64).collect();

        let mut out = BarMarkSpec::new(BAR_ID_BASE, band, y_scale)
            .with_origin(plot.origin())
            .with_fill(Brush::Solid(color))
            .marks(&heights);

        let date_axis = AxisSpec::bottom(DATE_AXIS_ID_BASE, band)
            .with_labels(values.iter().map(|d| d.date.clone()))
            .with_label_angle(self.label_angle)
            .with_label_anchor(TextAnchor::End)
            .with_label_font_size(self.label_font_size)
            .with_style(self.axis_style.clone());
        out.extend(date_axis.marks(Point::new(plot.x0, plot.y1)));

        let value_axis = AxisSpec::left(VALUE_AXIS_ID_BASE, y_scale)
            .with_tick_count(self.value_tick_count)
            .with_style(self.axis_style.clone());
        out.extend(value_axis.marks(plot.origin()));

        out.push(
            LabelStyle::default()
                .with_font_size(self.title_font_size)
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Alphabetic)
                .with_z_index(z_order::TITLES)
                .label(
                    MarkId::from_raw(TITLE_ID),
                    Point::new(plot.x0 + 0.5 * layout.plot_width(), plot.y0 - self.title_gap),
                    format!("{category} Usage"),
                ),
        );
        out
    }

    /// Places this tooltip next to `pointer` inside `viewport` (see [`place_tooltip`]).
    pub fn place(&self, pointer: Point, viewport: Size) -> Point {
        place_tooltip(pointer, self.size, viewport, self.pointer_offset)
    }
}

/// Computes the top-left corner of a tooltip of `size` shown near `pointer`.
///
/// The default spot is `offset` below and to the right of the pointer. On an axis where that
/// overflows the viewport, the tooltip flips to the other side of the pointer; if the flipped
/// spot does not fit either, it is pinned to `max(0, viewport - size)`.
pub fn place_tooltip(pointer: Point, size: Size, viewport: Size, offset: f64) -> Point {
    Point::new(
        place_axis(pointer.x, size.width, viewport.width, offset),
        place_axis(pointer.y, size.height, viewport.height, offset),
    )
}

fn place_axis(p: f64, extent: f64, limit: f64, offset: f64) -> f64 {
    let forward = p + offset;
    if forward + extent <= limit {
        return forward;
    }
    let flipped = p - extent - offset;
    if flipped >= 0.0 && flipped + extent <= limit {
        return flipped;
    }
    (limit - extent).max(0.0)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Rect;
    use peniko::color::palette::css;
    use streamview_core::{MarkKind, MarkPayload, TextPayload};

    use super::*;

    fn series(values: &[i64]) -> Vec<DatedValue> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| DatedValue {
                date: format!("2024-0{}", i + 1),
                value,
            })
            .collect()
    }

    fn bars(marks: &[Mark]) -> Vec<Rect> {
        marks
            .iter()
            .filter(|m| m.kind() == MarkKind::Rect)
            .filter_map(Mark::bounds)
            .collect()
    }

    #[test]
    fn tallest_bar_fills_the_plot_height() {
        let marks = TooltipSpec::new().marks("Claude", &series(&[5, 10]), css::PURPLE);
        let rects = bars(&marks);
        assert_eq!(rects.len(), 2);
        // Plot is 150 x 100 at (40, 20).
        assert!((rects[1].y0 - 20.0).abs() < 1e-9);
        assert!((rects[1].y1 - 120.0).abs() < 1e-9);
        assert!((rects[0].height() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn bands_are_padded() {
        let marks = TooltipSpec::new().marks("A", &series(&[1, 1, 1, 1]), css::RED);
        let rects = bars(&marks);
        // step = 150 / (4 - 0.2 + 0.4) = 35.714..., band = 0.8 * step.
        let step = 150.0 / 4.2;
        assert!((rects[0].width() - 0.8 * step).abs() < 1e-9);
        assert!((rects[0].x0 - (40.0 + 0.2 * step)).abs() < 1e-9);
        assert!((rects[1].x0 - rects[0].x0 - step).abs() < 1e-9);
    }

    #[test]
    fn title_names_the_category() {
        let marks = TooltipSpec::new().marks("GPT-4", &series(&[3]), css::RED);
        let title = marks.iter().find(|m| m.id == MarkId(TITLE_ID)).unwrap();
        let MarkPayload::Text(t) = &title.payload else {
            panic!("expected text");
        };
        assert_eq!(t.text, "GPT-4 Usage");
        assert_eq!(t.pos, Point::new(115.0, 15.0));
        assert_eq!(t.anchor, TextAnchor::Middle);
    }

    #[test]
    fn date_labels_are_rotated_and_end_anchored() {
        let marks = TooltipSpec::new().marks("A", &series(&[1, 2]), css::RED);
        let labels: Vec<&TextPayload> = marks
            .iter()
            .filter(|m| (DATE_AXIS_ID_BASE..VALUE_AXIS_ID_BASE).contains(&m.id.0))
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(labels.len(), 2);
        for t in labels {
            assert_eq!(t.angle, -45.0);
            assert_eq!(t.anchor, TextAnchor::End);
            assert_eq!(t.font_size, 8.0);
        }
    }

    #[test]
    fn all_zero_series_draws_flat_bars() {
        let marks = TooltipSpec::new().marks("A", &series(&[0, 0, 0]), css::RED);
        for r in bars(&marks) {
            assert_eq!(r.height(), 0.0);
        }
    }

    #[test]
    fn empty_series_still_has_a_title() {
        let marks = TooltipSpec::new().marks("A", &[], css::RED);
        assert!(bars(&marks).is_empty());
        assert!(marks.iter().any(|m| m.text() == Some("A Usage")));
    }

    #[test]
    fn long_series_keep_every_mark() {
        let values: Vec<DatedValue> = (0..12_000)
            .map(|i| DatedValue {
                date: format!("d{i}"),
                value: i % 7,
            })
            .collect();
        let marks = TooltipSpec::new().marks("A", &values, css::RED);
        let mut scene = streamview_core::Scene::new();
        scene.extend(marks.iter().cloned());
        assert_eq!(scene.len(), marks.len());
        assert_eq!(bars(&marks).len(), 12_000);
    }

    #[test]
    fn placement_defaults_below_right() {
        let p = place_tooltip(
            Point::new(100.0, 100.0),
            Size::new(200.0, 150.0),
            Size::new(1000.0, 800.0),
            15.0,
        );
        assert_eq!(p, Point::new(115.0, 115.0));
    }

    #[test]
    fn placement_flips_near_the_bottom_right_corner() {
        let p = place_tooltip(
            Point::new(950.0, 760.0),
            Size::new(200.0, 150.0),
            Size::new(1000.0, 800.0),
            15.0,
        );
        assert_eq!(p, Point::new(735.0, 595.0));
    }

    #[test]
    fn placement_pins_when_neither_side_fits() {
        // Tooltip wider than the space on either side of the pointer.
        let p = place_tooltip(
            Point::new(150.0, 10.0),
            Size::new(200.0, 150.0),
            Size::new(300.0, 800.0),
            15.0,
        );
        assert_eq!(p, Point::new(100.0, 25.0));
        // A viewport smaller than the tooltip pins to the origin.
        let q = place_tooltip(
            Point::new(50.0, 50.0),
            Size::new(200.0, 150.0),
            Size::new(100.0, 100.0),
            15.0,
        );
        assert_eq!(q, Point::ZERO);
    }

    #[test]
    fn spec_place_uses_its_size_and_offset() {
        let spec = TooltipSpec::new().with_pointer_offset(10.0);
        assert_eq!(
            spec.place(Point::new(0.0, 0.0), Size::new(500.0, 500.0)),
            Point::new(10.0, 10.0)
        );
    }
}
