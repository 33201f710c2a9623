// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! An [`AxisSpec`] pairs a scale with an orientation and generates the domain line, tick
//! marks and tick labels. Scales map into plot-local coordinates; [`AxisSpec::marks`] takes the
//! surface position of the axis origin (the plot's bottom-left corner for a bottom axis, its
//! top-left corner for a left axis).

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{BezPath, Point};
use peniko::Brush;
use streamview_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::format::format_tick_with_step;
use crate::primitives::{LabelStyle, StrokeStyle, rule, stroked_path};
use crate::scale::{ScaleBand, ScaleLinear, ScalePoint};
use crate::z_order;

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            label_fill: rule.brush.clone(),
            rule,
            label_font_size: 10.0,
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis below the plot; ticks and labels point down.
    Bottom,
    /// A vertical axis left of the plot; ticks and labels point left.
    Left,
}

/// The scale an axis labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisScale {
    /// Continuous values; ticks are "nice" values inside the domain.
    Linear(ScaleLinear),
    /// One tick per point.
    Point(ScalePoint),
    /// One tick per band, at the band center.
    Band(ScaleBand),
}

impl From<ScaleLinear> for AxisScale {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScalePoint> for AxisScale {
    fn from(value: ScalePoint) -> Self {
        Self::Point(value)
    }
}

impl From<ScaleBand> for AxisScale {
    fn from(value: ScaleBand) -> Self {
        Self::Band(value)
    }
}

impl AxisScale {
    fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Point(s) => s.range(),
            Self::Band(s) => s.range(),
        }
    }
}

/// An axis specification.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    /// Stable-id base. The domain line uses `id_base`; tick `i` uses `id_base + 1 + 2i` and its
    /// label `id_base + 2 + 2i`.
    pub id_base: u64,
    /// The scale being labeled.
    pub scale: AxisScale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks (continuous scales only).
    pub tick_count: usize,
    /// Length of the per-tick marks.
    pub tick_size_inner: f64,
    /// Length of the end caps of the domain line.
    pub tick_size_outer: f64,
    /// Gap between the tick end and its label.
    pub tick_padding: f64,
    /// Labels for discrete scales, by index. Missing entries fall back to the index.
    pub labels: Vec<String>,
    /// Tick label rotation in degrees, applied around the tick position.
    pub label_angle: f64,
    /// Overrides the orientation's default label anchor.
    pub label_anchor: Option<TextAnchor>,
    /// Axis styling.
    pub style: AxisStyle,
}

impl AxisSpec {
    /// Creates a new axis specification.
    ///
    /// Defaults: 10 ticks, 6 px ticks and end caps, 3 px label padding, 10 px labels.
    pub fn new(id_base: u64, scale: impl Into<AxisScale>, orient: AxisOrient) -> Self {
        Self {
            id_base,
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            labels: Vec::new(),
            label_angle: 0.0,
            label_anchor: None,
            style: AxisStyle::default(),
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: impl Into<AxisScale>) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Sets the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets both the tick length and the end cap length.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size_inner = tick_size;
        self.tick_size_outer = tick_size;
        self
    }

    /// Sets the gap between ticks and labels.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Sets the labels of a discrete scale.
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tick label rotation in degrees.
    pub fn with_label_angle(mut self, angle_degrees: f64) -> Self {
        self.label_angle = angle_degrees;
        self
    }

    /// Overrides the tick label anchor.
    pub fn with_label_anchor(mut self, anchor: TextAnchor) -> Self {
        self.label_anchor = Some(anchor);
        self
    }

    /// Sets the tick label font size.
    pub fn with_label_font_size(mut self, font_size: f64) -> Self {
        self.style.label_font_size = font_size;
        self
    }

    /// Sets the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Id of the tick mark at `index`.
    pub fn tick_id(&self, index: usize) -> MarkId {
        MarkId::from_raw(self.id_base + 1 + 2 * index as u64)
    }

    /// Id of the tick label at `index`.
    pub fn label_id(&self, index: usize) -> MarkId {
        self.tick_id(index).offset(1)
    }

    /// Tick positions along the axis (plot-local) and their labels.
    pub fn ticks(&self) -> Vec<(f64, String)> {
        match self.scale {
            AxisScale::Linear(s) => {
                let step = s.tick_step(self.tick_count);
                s.ticks(self.tick_count)
                    .into_iter()
                    .map(|v| (s.map(v), format_tick_with_step(v, step)))
                    .collect()
            }
            AxisScale::Point(s) => (0..s.count())
                .map(|i| (s.x(i), self.discrete_label(i)))
                .collect(),
            AxisScale::Band(s) => {
                let half = 0.5 * s.band_width();
                (0..s.count())
                    .map(|i| (s.x(i) + half, self.discrete_label(i)))
                    .collect()
            }
        }
    }

    fn discrete_label(&self, index: usize) -> String {
        self.labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| index.to_string())
    }

    /// Generates axis marks with the axis origin at `origin` (surface coordinates).
    pub fn marks(&self, origin: Point) -> Vec<Mark> {
        let mut out = Vec::new();
        out.push(self.domain_mark(origin));

        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        let theta = self.label_angle.to_radians();
        let (sin, cos) = (theta.sin(), theta.cos());

        let (anchor, baseline) = match self.orient {
            AxisOrient::Bottom => (TextAnchor::Middle, TextBaseline::Hanging),
            AxisOrient::Left => (TextAnchor::End, TextBaseline::Middle),
        };
        let label_style = LabelStyle::default()
            .with_font_size(self.style.label_font_size)
            .with_fill(self.style.label_fill.clone())
            .with_anchor(self.label_anchor.unwrap_or(anchor))
            .with_baseline(baseline)
            .with_angle(self.label_angle)
            .with_z_index(z_order::AXIS_LABELS);

        for (i, (t, label)) in self.ticks().into_iter().enumerate() {
            // Label offsets are `(0, spacing)` or `(-spacing, 0)` rotated around the tick.
            let (from, to, label_pos) = match self.orient {
                AxisOrient::Bottom => {
                    let x = origin.x + t;
                    (
                        Point::new(x, origin.y),
                        Point::new(x, origin.y + self.tick_size_inner),
                        Point::new(x - spacing * sin, origin.y + spacing * cos),
                    )
                }
                AxisOrient::Left => {
                    let y = origin.y + t;
                    (
                        Point::new(origin.x, y),
                        Point::new(origin.x - self.tick_size_inner, y),
                        Point::new(origin.x - spacing * cos, y - spacing * sin),
                    )
                }
            };
            out.push(rule(
                self.tick_id(i),
                from,
                to,
                &self.style.rule,
                z_order::AXIS_RULES,
            ));
            out.push(label_style.label(self.label_id(i), label_pos, label));
        }
        out
    }

    /// The domain line with its end caps.
    fn domain_mark(&self, origin: Point) -> Mark {
        let (r0, r1) = self.scale.range();
        let outer = self.tick_size_outer;
        let mut p = BezPath::new();
        match self.orient {
            AxisOrient::Bottom => {
                let y = origin.y;
                p.move_to((origin.x + r0, y + outer));
                p.line_to((origin.x + r0, y));
                p.line_to((origin.x + r1, y));
                p.line_to((origin.x + r1, y + outer));
            }
            AxisOrient::Left => {
                let x = origin.x;
                p.move_to((x - outer, origin.y + r0));
                p.line_to((x, origin.y + r0));
                p.line_to((x, origin.y + r1));
                p.line_to((x - outer, origin.y + r1));
            }
        }
        stroked_path(
            MarkId::from_raw(self.id_base),
            p,
            &self.style.rule,
            z_order::AXIS_RULES,
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use streamview_core::MarkPayload;

    use super::*;

    fn labels(marks: &[Mark]) -> Vec<&str> {
        marks.iter().filter_map(Mark::text).collect()
    }

    fn text_at(marks: &[Mark], id: MarkId) -> &streamview_core::TextPayload {
        let mark = marks.iter().find(|m| m.id == id).expect("missing mark");
        let MarkPayload::Text(t) = &mark.payload else {
            panic!("mark {id:?} is not text");
        };
        t
    }

    #[test]
    fn point_axis_labels_every_date() {
        let axis = AxisSpec::bottom(100, ScalePoint::new((0.0, 200.0), 3))
            .with_labels(["2024-01", "2024-02", "2024-03"]);
        let marks = axis.marks(Point::new(50.0, 470.0));
        assert_eq!(labels(&marks), ["2024-01", "2024-02", "2024-03"]);

        let mid = text_at(&marks, axis.label_id(1));
        assert_eq!(mid.pos, Point::new(150.0, 479.0));
        assert_eq!(mid.anchor, TextAnchor::Middle);
        assert_eq!(mid.baseline, TextBaseline::Hanging);
        // Domain + one tick and one label per date.
        assert_eq!(marks.len(), 1 + 2 * 3);
    }

    #[test]
    fn missing_discrete_labels_fall_back_to_index() {
        let axis = AxisSpec::bottom(1, ScalePoint::new((0.0, 10.0), 2)).with_labels(["a"]);
        assert_eq!(labels(&axis.marks(Point::ZERO)), ["a", "1"]);
    }

    #[test]
    fn left_linear_axis_formats_ticks() {
        let axis = AxisSpec::left(1, ScaleLinear::new((0.0, 2000.0), (100.0, 0.0)))
            .with_tick_count(4);
        let marks = axis.marks(Point::new(40.0, 20.0));
        assert_eq!(labels(&marks), ["0", "500", "1,000", "1,500", "2,000"]);
        let top = text_at(&marks, axis.label_id(4));
        assert_eq!(top.pos, Point::new(31.0, 20.0));
        assert_eq!(top.anchor, TextAnchor::End);
    }

    #[test]
    fn band_ticks_sit_on_band_centers() {
        let band = ScaleBand::new((0.0, 100.0), 4);
        let axis = AxisSpec::bottom(1, band);
        let xs: Vec<f64> = axis.ticks().iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, vec![12.5, 37.5, 62.5, 87.5]);
    }

    #[test]
    fn rotated_labels_pivot_around_the_tick() {
        let axis = AxisSpec::bottom(1, ScalePoint::new((0.0, 10.0), 1))
            .with_label_angle(-90.0)
            .with_label_anchor(TextAnchor::End);
        let marks = axis.marks(Point::ZERO);
        let t = text_at(&marks, axis.label_id(0));
        // The label offset (0, 9) rotated by -90 degrees points right of the tick at x = 5.
        assert!((t.pos.x - 14.0).abs() < 1e-9, "{:?}", t.pos);
        assert!(t.pos.y.abs() < 1e-9, "{:?}", t.pos);
        assert_eq!(t.angle, -90.0);
        assert_eq!(t.anchor, TextAnchor::End);
    }

    #[test]
    fn tick_and_label_ids_never_collide() {
        let axis = AxisSpec::bottom(10, ScalePoint::new((0.0, 1000.0), 1200));
        let marks = axis.marks(Point::ZERO);
        assert_eq!(marks.len(), 1 + 2 * 1200);
        let mut scene = streamview_core::Scene::new();
        scene.extend(marks.iter().cloned());
        assert_eq!(scene.len(), marks.len());
        assert_eq!(axis.tick_id(999), MarkId(10 + 1 + 1998));
        assert_eq!(axis.label_id(999), MarkId(10 + 2 + 1998));
    }

    #[test]
    fn domain_line_has_end_caps() {
        let axis = AxisSpec::bottom(7, ScalePoint::new((0.0, 100.0), 2));
        let marks = axis.marks(Point::new(10.0, 50.0));
        let domain = marks
            .iter()
            .find(|m| m.id == MarkId::from_raw(7))
            .and_then(Mark::bounds)
            .expect("domain path");
        assert_eq!(domain, kurbo::Rect::new(10.0, 50.0, 110.0, 56.0));
    }
}
