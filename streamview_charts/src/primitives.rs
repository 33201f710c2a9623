// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-mark helpers shared by axes, legends, bars and titles.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use streamview_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::z_order;

/// A paint + width pair for stroked paths (domain lines, ticks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in surface units.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// How a text label is drawn. One style is usually shared by a whole row of labels.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    /// Font size in surface units.
    pub font_size: f64,
    /// Rotation around the anchor position, in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Paint order.
    pub z_index: i32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            fill: Brush::Solid(css::BLACK),
            z_index: z_order::TITLES,
        }
    }
}

impl LabelStyle {
    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the paint order.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// A text mark anchored at `pos`.
    pub fn label(&self, id: MarkId, pos: Point, text: impl Into<String>) -> Mark {
        Mark::builder(id)
            .text()
            .z_index(self.z_index)
            .x(pos.x)
            .y(pos.y)
            .content(text)
            .font_size(self.font_size)
            .angle(self.angle)
            .text_anchor(self.anchor)
            .text_baseline(self.baseline)
            .fill_brush(self.fill.clone())
            .build()
    }
}

/// An unfilled path drawn with `stroke`.
pub fn stroked_path(id: MarkId, path: BezPath, stroke: &StrokeStyle, z_index: i32) -> Mark {
    Mark::builder(id)
        .path()
        .shape(path)
        .z_index(z_index)
        .fill(Color::TRANSPARENT)
        .stroke_brush(stroke.brush.clone())
        .stroke_width(stroke.stroke_width)
        .build()
}

/// A straight segment from `from` to `to`.
pub fn rule(id: MarkId, from: Point, to: Point, stroke: &StrokeStyle, z_index: i32) -> Mark {
    let mut path = BezPath::new();
    path.move_to(from);
    path.line_to(to);
    stroked_path(id, path, stroke, z_index)
}

/// A filled rectangle.
pub fn filled_rect(id: MarkId, rect: Rect, fill: impl Into<Brush>, z_index: i32) -> Mark {
    Mark::builder(id)
        .rect()
        .z_index(z_index)
        .x(rect.x0)
        .y(rect.y0)
        .w(rect.width())
        .h(rect.height())
        .fill_brush(fill)
        .build()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use streamview_core::{MarkKind, MarkPayload};

    use super::*;

    #[test]
    fn rule_is_a_stroke_only_segment() {
        let stroke = StrokeStyle::solid(css::GRAY, 2.0);
        let mark = rule(
            MarkId(7),
            Point::new(1.0, 2.0),
            Point::new(1.0, 8.0),
            &stroke,
            z_order::AXIS_RULES,
        );
        let MarkPayload::Path(p) = &mark.payload else {
            panic!("expected a path");
        };
        assert_eq!(p.fill, Brush::Solid(Color::TRANSPARENT));
        assert_eq!(p.stroke, Brush::Solid(css::GRAY));
        assert_eq!(p.stroke_width, 2.0);
        assert_eq!(mark.bounds(), Some(Rect::new(1.0, 2.0, 1.0, 8.0)));
        assert_eq!(mark.z_index, z_order::AXIS_RULES);
    }

    #[test]
    fn label_carries_the_whole_style() {
        let style = LabelStyle::default()
            .with_font_size(8.0)
            .with_angle(-45.0)
            .with_anchor(TextAnchor::End)
            .with_baseline(TextBaseline::Hanging)
            .with_fill(css::DIM_GRAY)
            .with_z_index(z_order::AXIS_LABELS);
        let mark = style.label(MarkId(3), Point::new(4.0, 5.0), "2024-01");
        let MarkPayload::Text(t) = &mark.payload else {
            panic!("expected text");
        };
        assert_eq!(t.text, "2024-01");
        assert_eq!(t.pos, Point::new(4.0, 5.0));
        assert_eq!(t.font_size, 8.0);
        assert_eq!(t.angle, -45.0);
        assert_eq!(t.anchor, TextAnchor::End);
        assert_eq!(t.baseline, TextBaseline::Hanging);
        assert_eq!(t.fill, Brush::Solid(css::DIM_GRAY));
        assert_eq!(mark.z_index, z_order::AXIS_LABELS);
    }

    #[test]
    fn filled_rect_keeps_geometry() {
        let r = Rect::new(10.0, 20.0, 30.0, 25.0);
        let mark = filled_rect(MarkId(1), r, css::RED, z_order::SERIES_FILL);
        assert_eq!(mark.kind(), MarkKind::Rect);
        assert_eq!(mark.bounds(), Some(r));
    }
}
