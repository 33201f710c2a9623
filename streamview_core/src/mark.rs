// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marks: the draw commands produced by chart rendering.

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::color::palette::css;
use peniko::{Brush, Color};

/// Stable identity of a mark within a surface.
///
/// Chart builders derive ids from a per-component base plus a deterministic offset, so the
/// same input always produces the same ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the id `n` steps after this one.
    pub const fn offset(self, n: u64) -> Self {
        Self(self.0.wrapping_add(n))
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Text starts at the anchor position.
    #[default]
    Start,
    /// Text is centered on the anchor position.
    Middle,
    /// Text ends at the anchor position.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The anchor is the vertical middle of the text.
    Middle,
    /// The anchor is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// The anchor is the top of the text.
    Hanging,
    /// The anchor is the ideographic (bottom) baseline.
    Ideographic,
}

/// The kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Arbitrary filled and/or stroked path.
    Path,
    /// Unshaped text run.
    Text,
}

/// Geometry and paint of a rectangle mark.
#[derive(Clone, Debug, PartialEq)]
pub struct RectPayload {
    /// Rectangle in surface coordinates (non-negative width and height).
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Opacity multiplier in `0.0..=1.0`.
    pub opacity: f64,
}

/// Geometry and paint of a path mark.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPayload {
    /// Path in surface coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width; `0.0` disables the stroke.
    pub stroke_width: f64,
    /// Opacity multiplier in `0.0..=1.0`.
    pub opacity: f64,
}

/// Position, content and style of a text mark.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPayload {
    /// Anchor position in surface coordinates.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in surface units.
    pub font_size: f64,
    /// Rotation around `pos`, in degrees.
    pub angle: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// The resolved content of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectPayload),
    /// A path.
    Path(PathPayload),
    /// A text run.
    Text(TextPayload),
}

impl MarkPayload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns geometric bounds, if they can be known without text measurement.
    ///
    /// Text marks return `None`; callers that need text extents should measure them.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }
}

/// A single draw command.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Paint order; lower values are drawn first.
    pub z_index: i32,
    /// What to draw.
    pub payload: MarkPayload,
}

impl Mark {
    /// Starts building a mark. The builder defaults to a rectangle.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder::new(id)
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Returns geometric bounds (see [`MarkPayload::bounds`]).
    pub fn bounds(&self) -> Option<Rect> {
        self.payload.bounds()
    }

    /// Returns the text content for text marks.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            MarkPayload::Text(t) => Some(&t.text),
            _ => None,
        }
    }
}

/// Builder for [`Mark`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    id: MarkId,
    z_index: i32,
    kind: MarkKind,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    path: BezPath,
    text: String,
    font_size: f64,
    angle: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    fill: Brush,
    stroke: Brush,
    stroke_width: f64,
    opacity: f64,
}

impl MarkBuilder {
    fn new(id: MarkId) -> Self {
        Self {
            id,
            z_index: 0,
            kind: MarkKind::Rect,
            x: 0.0,
            y: 0.0,
            w: 0.0,
            h: 0.0,
            path: BezPath::new(),
            text: String::new(),
            font_size: 12.0,
            angle: 0.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
            fill: Brush::Solid(css::BLACK),
            stroke: Brush::Solid(Color::TRANSPARENT),
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }

    /// Builds a rectangle mark.
    pub fn rect(mut self) -> Self {
        self.kind = MarkKind::Rect;
        self
    }

    /// Builds a path mark.
    pub fn path(mut self) -> Self {
        self.kind = MarkKind::Path;
        self
    }

    /// Builds a text mark.
    pub fn text(mut self) -> Self {
        self.kind = MarkKind::Text;
        self
    }

    /// Sets the paint order.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the x position (rect origin or text anchor).
    pub fn x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Sets the y position (rect origin or text anchor).
    pub fn y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Sets the rect width.
    pub fn w(mut self, w: f64) -> Self {
        self.w = w;
        self
    }

    /// Sets the rect height.
    pub fn h(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Sets the path geometry.
    pub fn shape(mut self, path: BezPath) -> Self {
        self.path = path;
        self
    }

    /// Sets the text content.
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the font size.
    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the text rotation in degrees.
    pub fn angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Sets the text anchor.
    pub fn text_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn text_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets a solid fill color.
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Brush::Solid(color);
        self
    }

    /// Sets the fill paint.
    pub fn fill_brush(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the stroke paint.
    pub fn stroke_brush(mut self, stroke: impl Into<Brush>) -> Self {
        self.stroke = stroke.into();
        self
    }

    /// Sets the stroke width.
    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Sets the opacity multiplier (clamped to `0.0..=1.0`).
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        let payload = match self.kind {
            MarkKind::Rect => MarkPayload::Rect(RectPayload {
                rect: Rect::new(self.x, self.y, self.x + self.w, self.y + self.h).abs(),
                fill: self.fill,
                opacity: self.opacity,
            }),
            MarkKind::Path => MarkPayload::Path(PathPayload {
                path: self.path,
                fill: self.fill,
                stroke: self.stroke,
                stroke_width: self.stroke_width.max(0.0),
                opacity: self.opacity,
            }),
            MarkKind::Text => MarkPayload::Text(TextPayload {
                pos: Point::new(self.x, self.y),
                text: self.text,
                font_size: self.font_size,
                angle: self.angle,
                anchor: self.anchor,
                baseline: self.baseline,
                fill: self.fill,
            }),
        };
        Mark {
            id: self.id,
            z_index: self.z_index,
            payload,
        }
    }
}
