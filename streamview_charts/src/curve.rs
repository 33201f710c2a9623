// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform cubic B-spline ("basis") interpolation into [`BezPath`]s.
//!
//! The curve passes through the first and last points and is pulled toward the interior
//! control points, so stacked layers drawn with it stay smooth without overshooting.

use kurbo::{BezPath, Point};

/// Streaming basis-curve writer.
///
/// Feed points with [`BasisCurve::point`] between [`BasisCurve::line_start`] and
/// [`BasisCurve::line_end`]. In area mode the second line continues the first one (it starts
/// with a `line_to` instead of a `move_to`) and closes the path.
#[derive(Debug)]
pub(crate) struct BasisCurve<'a> {
    path: &'a mut BezPath,
    area: bool,
    continues: bool,
    seen: u8,
    p0: Point,
    p1: Point,
}

impl<'a> BasisCurve<'a> {
    pub(crate) fn new(path: &'a mut BezPath, area: bool) -> Self {
        Self {
            path,
            area,
            continues: false,
            seen: 0,
            p0: Point::ZERO,
            p1: Point::ZERO,
        }
    }

    pub(crate) fn line_start(&mut self) {
        self.seen = 0;
    }

    pub(crate) fn point(&mut self, p: Point) {
        match self.seen {
            0 => {
                self.seen = 1;
                if self.continues {
                    self.path.line_to(p);
                } else {
                    self.path.move_to(p);
                }
            }
            1 => self.seen = 2,
            2 => {
                self.seen = 3;
                self.path.line_to(lerp_sixth(self.p0, self.p1));
                self.segment(p);
            }
            _ => self.segment(p),
        }
        self.p0 = self.p1;
        self.p1 = p;
    }

    pub(crate) fn line_end(&mut self) {
        if self.seen == 3 {
            self.segment(self.p1);
        }
        if self.seen >= 2 {
            self.path.line_to(self.p1);
        }
        if self.area {
            if self.continues {
                self.path.close_path();
            }
            self.continues = !self.continues;
        }
    }

    fn segment(&mut self, p: Point) {
        let (p0, p1) = (self.p0, self.p1);
        self.path.curve_to(
            ((2.0 * p0.x + p1.x) / 3.0, (2.0 * p0.y + p1.y) / 3.0),
            ((p0.x + 2.0 * p1.x) / 3.0, (p0.y + 2.0 * p1.y) / 3.0),
            (
                (p0.x + 4.0 * p1.x + p.x) / 6.0,
                (p0.y + 4.0 * p1.y + p.y) / 6.0,
            ),
        );
    }
}

fn lerp_sixth(p0: Point, p1: Point) -> Point {
    Point::new((5.0 * p0.x + p1.x) / 6.0, (5.0 * p0.y + p1.y) / 6.0)
}

/// An open basis curve through `points`.
pub fn basis_line(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if points.is_empty() {
        return path;
    }
    let mut curve = BasisCurve::new(&mut path, false);
    curve.line_start();
    for &p in points {
        curve.point(p);
    }
    curve.line_end();
    path
}

/// A closed area between two basis curves.
///
/// `top` is traced forward and `bottom` backward, so both slices run in the same x order.
/// Returns an empty path if either side is empty.
pub fn basis_area(top: &[Point], bottom: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if top.is_empty() || bottom.is_empty() {
        return path;
    }
    let mut curve = BasisCurve::new(&mut path, true);
    curve.line_start();
    for &p in top {
        curve.point(p);
    }
    curve.line_end();
    curve.line_start();
    for &p in bottom.iter().rev() {
        curve.point(p);
    }
    curve.line_end();
    path
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::{PathEl, Shape};

    use super::*;

    fn pts(xy: &[(f64, f64)]) -> std::vec::Vec<Point> {
        xy.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn two_points_make_a_segment() {
        let path = basis_line(&pts(&[(0.0, 0.0), (6.0, 6.0)]));
        assert_eq!(
            path.elements(),
            [
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(6.0, 6.0)),
            ]
        );
    }

    #[test]
    fn three_points_follow_the_spline() {
        let path = basis_line(&pts(&[(0.0, 0.0), (6.0, 6.0), (12.0, 0.0)]));
        let els = path.elements();
        assert_eq!(els.len(), 5);
        assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(els[1], PathEl::LineTo(Point::new(1.0, 1.0)));
        // Interior knot: (p0 + 4 p1 + p2) / 6.
        let PathEl::CurveTo(_, _, knot) = els[2] else {
            panic!("expected a cubic, got {:?}", els[2]);
        };
        assert_eq!(knot, Point::new(6.0, 4.0));
        // The curve ends exactly on the last point.
        assert_eq!(els[4], PathEl::LineTo(Point::new(12.0, 0.0)));
    }

    #[test]
    fn area_is_closed_and_covers_the_band() {
        let top = pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
        let bottom = pts(&[(0.0, 10.0), (10.0, 10.0), (20.0, 10.0), (30.0, 10.0)]);
        let path = basis_area(&top, &bottom);
        let els = path.elements();
        assert_eq!(els.first(), Some(&PathEl::MoveTo(Point::new(0.0, 0.0))));
        assert_eq!(els.last(), Some(&PathEl::ClosePath));
        // Only one subpath: the bottom edge continues the top edge.
        let moves = els
            .iter()
            .filter(|e| matches!(e, PathEl::MoveTo(_)))
            .count();
        assert_eq!(moves, 1);
        assert!(path.contains(Point::new(15.0, 5.0)));
        assert!(!path.contains(Point::new(15.0, 15.0)));
    }

    #[test]
    fn single_point_area_is_degenerate_but_valid() {
        let path = basis_area(&pts(&[(5.0, 0.0)]), &pts(&[(5.0, 10.0)]));
        assert_eq!(
            path.elements(),
            [
                PathEl::MoveTo(Point::new(5.0, 0.0)),
                PathEl::LineTo(Point::new(5.0, 10.0)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn empty_inputs_give_empty_paths() {
        assert!(basis_line(&[]).elements().is_empty());
        assert!(basis_area(&[], &pts(&[(0.0, 0.0)])).elements().is_empty());
    }
}
