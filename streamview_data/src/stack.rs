// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack layout: per-category baselines and tops over a [`SeriesTable`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::SeriesTable;

/// Stack baseline offset mode.
///
/// Series are always stacked in the table's category order (bottom first); no offset reorders
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackOffset {
    /// Stack every series on top of the previous one, starting at 0 (D3's `stackOffsetNone`).
    Zero,
    /// Center each column around 0 (D3's `stackOffsetSilhouette`).
    Center,
    /// Streamgraph-style "wiggle" baseline (D3's `stackOffsetWiggle`).
    ///
    /// Shifts the baseline per column to minimize the weighted change in slope across the
    /// stacked series. Intended for non-negative values.
    #[default]
    Wiggle,
    /// Scale each column so its total height is `1.0` (D3's `stackOffsetExpand`).
    ///
    /// Columns summing to 0 are left as zero-height stacks.
    Normalize,
}

/// Baseline and top of one series at one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackPoint {
    /// Index into [`SeriesTable::dates`].
    pub date_index: usize,
    /// Lower edge.
    pub baseline: f64,
    /// Upper edge.
    pub top: f64,
}

impl StackPoint {
    /// `top - baseline`.
    pub fn thickness(&self) -> f64 {
        self.top - self.baseline
    }
}

/// The stacked geometry of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedLayer {
    /// Category label.
    pub category: String,
    /// Position in stacking order (0 is the bottom layer).
    pub index: usize,
    /// One point per date, in date order.
    pub points: Vec<StackPoint>,
}

/// Computes stacked layers from a [`SeriesTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackLayout {
    /// Baseline offset mode.
    pub offset: StackOffset,
}

impl StackLayout {
    /// Creates a layout with the default ([`StackOffset::Wiggle`]) offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the offset mode.
    pub fn with_offset(mut self, offset: StackOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Stacks every category of `table`, in category order.
    ///
    /// Returns one layer per category. An empty table yields no layers.
    pub fn layers(&self, table: &SeriesTable) -> Vec<StackedLayer> {
        if table.is_empty() {
            return Vec::new();
        }
        let n = table.categories().len();
        let m = table.dates().len();

        // `s[i][j] = [baseline, top]`; before offsetting, `[0, value]`.
        #[allow(
            clippy::cast_precision_loss,
            reason = "counts are far below 2^53 in practice"
        )]
        let mut s: Vec<Vec<[f64; 2]>> = (0..n)
            .map(|i| {
                table
                    .rows()
                    .iter()
                    .map(|row| [0.0, row.values[i] as f64])
                    .collect()
            })
            .collect();

        match self.offset {
            StackOffset::Zero => {}
            StackOffset::Center => silhouette(&mut s, m),
            StackOffset::Wiggle => wiggle(&mut s, m),
            StackOffset::Normalize => expand(&mut s, m),
        }
        stack_none(&mut s);

        log::debug!(
            "stack: {n} layers x {m} dates ({:?} offset)",
            self.offset
        );

        s.into_iter()
            .enumerate()
            .map(|(index, col)| StackedLayer {
                category: table.categories()[index].clone(),
                index,
                points: col
                    .into_iter()
                    .enumerate()
                    .map(|(date_index, [baseline, top])| StackPoint {
                        date_index,
                        baseline,
                        top,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Accumulates each series on top of the previous one.
fn stack_none(s: &mut [Vec<[f64; 2]>]) {
    for i in 1..s.len() {
        let (below, rest) = s.split_at_mut(i);
        let prev = &below[i - 1];
        for (cur, p) in rest[0].iter_mut().zip(prev) {
            let base = if p[1].is_nan() { p[0] } else { p[1] };
            cur[0] = base;
            cur[1] += base;
        }
    }
}

fn silhouette(s: &mut [Vec<[f64; 2]>], m: usize) {
    for j in 0..m {
        let sum: f64 = s.iter().map(|series| or_zero(series[j][1])).sum();
        let y = -sum / 2.0;
        s[0][j][0] = y;
        s[0][j][1] += y;
    }
}

fn expand(s: &mut [Vec<[f64; 2]>], m: usize) {
    for j in 0..m {
        let sum: f64 = s.iter().map(|series| or_zero(series[j][1])).sum();
        if sum != 0.0 {
            for series in s.iter_mut() {
                series[j][1] /= sum;
            }
        }
    }
}

fn wiggle(s: &mut [Vec<[f64; 2]>], m: usize) {
    let mut y = 0.0;
    for j in 1..m {
        let mut s1 = 0.0;
        let mut s2 = 0.0;
        // Slope of everything stacked below series `i`.
        let mut below = 0.0;
        for series in s.iter() {
            let cur = or_zero(series[j][1]);
            let prev = or_zero(series[j - 1][1]);
            let s3 = (cur - prev) / 2.0 + below;
            below += cur - prev;
            s1 += cur;
            s2 += s3 * cur;
        }
        s[0][j - 1][0] = y;
        s[0][j - 1][1] += y;
        if s1 != 0.0 {
            y -= s2 / s1;
        }
    }
    s[0][m - 1][0] = y;
    s[0][m - 1][1] += y;
}

fn or_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

/// The smallest baseline and largest top over all finite points, or `None` if there are none.
pub fn stack_extent(layers: &[StackedLayer]) -> Option<(f64, f64)> {
    let mut out: Option<(f64, f64)> = None;
    for p in layers.iter().flat_map(|l| &l.points) {
        for v in [p.baseline, p.top] {
            if !v.is_finite() {
                continue;
            }
            out = Some(match out {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::{CsvOptions, parse_records};

    fn table(text: &str) -> SeriesTable {
        SeriesTable::from_records(&parse_records(text, &CsvOptions::default()).unwrap())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_offset_stacks_from_zero() {
        let t = table("date,A,B\nd1,1,2\nd2,3,4");
        let layers = StackLayout::new()
            .with_offset(StackOffset::Zero)
            .layers(&t);
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].points[0].baseline, 0.0);
        assert_eq!(layers[0].points[0].top, 1.0);
        assert_eq!(layers[1].points[0].baseline, 1.0);
        assert_eq!(layers[1].points[0].top, 3.0);
        assert_eq!(layers[1].points[1].top, 7.0);
        assert_eq!(layers[1].category, "B");
        assert_eq!(layers[1].index, 1);
    }

    #[test]
    fn center_offset_is_symmetric() {
        let t = table("date,A,B\nd1,1,3\nd2,2,2");
        let layers = StackLayout::new()
            .with_offset(StackOffset::Center)
            .layers(&t);
        for j in 0..2 {
            let lo = layers[0].points[j].baseline;
            let hi = layers[1].points[j].top;
            assert!(approx(lo, -hi), "column {j}: {lo} vs {hi}");
        }
        assert!(approx(layers[0].points[0].baseline, -2.0));
    }

    #[test]
    fn normalize_offset_sums_to_one() {
        let t = table("date,A,B\nd1,1,3\nd2,0,0");
        let layers = StackLayout::new()
            .with_offset(StackOffset::Normalize)
            .layers(&t);
        assert!(approx(layers[0].points[0].top, 0.25));
        assert!(approx(layers[1].points[0].top, 1.0));
        // An all-zero column stays flat at 0.
        assert_eq!(layers[1].points[1].top, 0.0);
    }

    #[test]
    fn wiggle_matches_d3_reference() {
        // Reference values from d3.stack().offset(d3.stackOffsetWiggle) on the same data.
        let t = table("date,A,B\nd1,1,1\nd2,2,2\nd3,1,3");
        let layers = StackLayout::new().layers(&t);
        let b: Vec<f64> = layers[0].points.iter().map(|p| p.baseline).collect();
        // j=1: s1=4, s2 = (0.5*2) + (0.5+1)*2 = 4 -> y = -1
        // j=2: diffs A=-1, B=1; s3A = -0.5, s3B = 0.5 - 1 = -0.5; s1=4; s2 = -0.5 - 1.5 = -2
        //      -> y = -1 + 0.5 = -0.5
        assert!(approx(b[0], 0.0));
        assert!(approx(b[1], -1.0));
        assert!(approx(b[2], -0.5));
        // Thickness is preserved.
        assert!(approx(layers[1].points[2].thickness(), 3.0));
        assert!(approx(layers[1].points[2].baseline, 0.5));
    }

    #[test]
    fn wiggle_single_date_stays_at_zero() {
        let t = table("date,A,B\nd1,4,5");
        let layers = StackLayout::new().layers(&t);
        assert_eq!(layers[0].points[0].baseline, 0.0);
        assert_eq!(layers[1].points[0].top, 9.0);
    }

    #[test]
    fn empty_table_yields_no_layers() {
        assert!(StackLayout::new().layers(&table("")).is_empty());
        assert_eq!(stack_extent(&[]), None);
    }

    #[test]
    fn extent_spans_all_layers() {
        let t = table("date,A,B\nd1,1,3\nd2,2,2");
        let layers = StackLayout::new()
            .with_offset(StackOffset::Center)
            .layers(&t);
        assert_eq!(stack_extent(&layers), Some((-2.0, 2.0)));
    }
}
