// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stream layer mark generation (one smoothed area per stacked layer).

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{BezPath, Point};
use peniko::{Brush, Color};
use streamview_core::{Mark, MarkId};
use streamview_data::StackedLayer;

use crate::curve::basis_area;
use crate::scale::{ScaleLinear, ScalePoint};

/// A stacked layer rendered as a basis-interpolated area between its baseline and top.
///
/// The x scale positions dates and the y scale maps stacked values, both in plot-local
/// coordinates; `origin` is the plot's top-left corner on the surface.
#[derive(Clone, Debug)]
pub struct StreamMarkSpec {
    /// Stable-id base; the layer at stack index `i` uses `id_base + i`.
    pub id_base: u64,
    /// Date positions.
    pub x_scale: ScalePoint,
    /// Stacked value positions.
    pub y_scale: ScaleLinear,
    /// Surface position of the plot origin.
    pub origin: Point,
    /// Opacity multiplier applied to every layer.
    pub opacity: f64,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl StreamMarkSpec {
    /// Creates a stream mark spec with full opacity.
    pub fn new(id_base: u64, x_scale: ScalePoint, y_scale: ScaleLinear) -> Self {
        Self {
            id_base,
            x_scale,
            y_scale,
            origin: Point::ZERO,
            opacity: 1.0,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the surface position of the plot origin.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Sets the layer opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// The area outline of `layer` in surface coordinates.
    pub fn path(&self, layer: &StackedLayer) -> BezPath {
        let (top, bottom): (Vec<Point>, Vec<Point>) = layer
            .points
            .iter()
            .map(|p| {
                let x = self.origin.x + self.x_scale.x(p.date_index);
                (
                    Point::new(x, self.origin.y + self.y_scale.map(p.top)),
                    Point::new(x, self.origin.y + self.y_scale.map(p.baseline)),
                )
            })
            .unzip();
        basis_area(&top, &bottom)
    }

    /// The filled mark of `layer`.
    ///
    /// Layers stack bottom-up, so a layer's paint order follows its stack index.
    pub fn mark(&self, layer: &StackedLayer, fill: Color) -> Mark {
        Mark::builder(MarkId::from_raw(self.id_base + layer.index as u64))
            .path()
            .z_index(self.z_index)
            .shape(self.path(layer))
            .fill_brush(Brush::Solid(fill))
            .opacity(self.opacity)
            .build()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::String;

    use kurbo::{PathEl, Shape};
    use peniko::color::palette::css;
    use streamview_core::MarkPayload;
    use streamview_data::StackPoint;

    use super::*;

    fn layer(points: &[(f64, f64)]) -> StackedLayer {
        StackedLayer {
            category: String::from("A"),
            index: 2,
            points: points
                .iter()
                .enumerate()
                .map(|(date_index, &(baseline, top))| StackPoint {
                    date_index,
                    baseline,
                    top,
                })
                .collect(),
        }
    }

    fn spec() -> StreamMarkSpec {
        StreamMarkSpec::new(
            100,
            ScalePoint::new((0.0, 100.0), 3),
            ScaleLinear::new((0.0, 10.0), (100.0, 0.0)),
        )
        .with_origin(Point::new(50.0, 20.0))
    }

    #[test]
    fn layer_path_is_closed_and_covers_the_band() {
        let l = layer(&[(0.0, 4.0), (0.0, 6.0), (0.0, 4.0)]);
        let path = spec().path(&l);
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
        let b = path.bounding_box();
        // Basis curves start and end on the first/last points.
        assert_eq!(b.x0, 50.0);
        assert_eq!(b.x1, 150.0);
        assert_eq!(b.y1, 120.0);
        assert!(b.y0 > 20.0 + 40.0 && b.y0 < 20.0 + 60.0);
        // The interior of the band is inside the area.
        assert!(path.contains(Point::new(100.0, 100.0)));
        assert!(!path.contains(Point::new(100.0, 30.0)));
    }

    #[test]
    fn mark_uses_stack_index_for_identity() {
        let l = layer(&[(1.0, 2.0), (1.0, 2.0), (1.0, 2.0)]);
        let mark = spec().with_opacity(0.9).mark(&l, css::RED);
        assert_eq!(mark.id, MarkId(102));
        let MarkPayload::Path(p) = &mark.payload else {
            panic!("expected path");
        };
        assert_eq!(p.fill, Brush::Solid(css::RED));
        assert_eq!(p.opacity, 0.9);
        let b = mark.bounds().unwrap();
        for (got, want) in [(b.x0, 50.0), (b.y0, 100.0), (b.x1, 150.0), (b.y1, 110.0)] {
            assert!((got - want).abs() < 1e-9, "{b:?}");
        }
    }

    #[test]
    fn empty_layer_has_empty_path() {
        let l = layer(&[]);
        assert!(spec().path(&l).elements().is_empty());
        assert_eq!(spec().mark(&l, css::RED).bounds(), None);
    }
}
