// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for hover index selection and tooltip placement.

use kurbo::{Point, Size};
use proptest::prelude::*;
use streamview_charts::{nearest_index, place_tooltip};

proptest! {
    #[test]
    fn nearest_index_is_in_range_and_monotonic(
        width in 1.0f64..2000.0,
        count in 1usize..200,
        a in -500.0f64..2500.0,
        b in -500.0f64..2500.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let i = nearest_index(lo, width, count);
        let j = nearest_index(hi, width, count);
        prop_assert!(i < count);
        prop_assert!(j < count);
        prop_assert!(i <= j);
    }

    #[test]
    fn nearest_index_hits_both_ends(width in 1.0f64..2000.0, count in 1usize..200) {
        prop_assert_eq!(nearest_index(0.0, width, count), 0);
        prop_assert_eq!(nearest_index(width, width, count), count - 1);
    }

    #[test]
    fn tooltip_stays_in_viewport_when_it_fits(
        vw in 200.0f64..2000.0,
        vh in 150.0f64..2000.0,
        fx in 0.0f64..=1.0,
        fy in 0.0f64..=1.0,
    ) {
        let size = Size::new(200.0, 150.0);
        let pointer = Point::new(fx * vw, fy * vh);
        let p = place_tooltip(pointer, size, Size::new(vw, vh), 15.0);
        prop_assert!(p.x >= 0.0 && p.x + size.width <= vw + 1e-9);
        prop_assert!(p.y >= 0.0 && p.y + size.height <= vh + 1e-9);
    }
}
