// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny scale utilities.
//!
//! These follow the D3 scale conventions the streamgraph was designed against: linear scales
//! with "nice" tick steps (1, 2 or 5 times a power of ten), and point/band scales over an
//! ordinal domain with inner/outer padding and alignment.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns tick values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the spacing of [`ScaleLinear::ticks`] for the same `count`.
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count)
    }
}

// Thresholds between the 1/2/5/10 step multipliers.
const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = core::f64::consts::SQRT_2;

#[allow(
    clippy::cast_possible_truncation,
    reason = "`power` is a finite floor of a log10 and fits in i32"
)]
fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powi(power as i32);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10_f64.powi(-power as i32) / factor;
        i1 = (start * k).round();
        i2 = (stop * k).round();
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        // Negative increments mean "divide by", which keeps small steps exact.
        inc = -k;
    } else {
        let k = 10_f64.powi(power as i32) * factor;
        i1 = (start / k).round();
        i2 = (stop / k).round();
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        inc = k;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some((i1, i2, inc))
}

/// Returns roughly `count` evenly spaced "nice" values inside `[start, stop]`.
///
/// Values are in the same direction as the arguments; `start == stop` yields `[start]`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "tick index span is non-negative and capped at 10k"
)]
pub(crate) fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return alloc::vec![start];
    }
    let reverse = stop < start;
    let spec = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    let Some((i1, i2, inc)) = spec else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    let n = (i2 - i1).min(10_000.0) as usize + 1;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    (0..n)
        .map(|i| {
            let i = i as f64;
            if reverse { value(i2 - i) } else { value(i1 + i) }
        })
        .collect()
}

/// Spacing between consecutive values of [`ticks`] for the same arguments.
pub(crate) fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let reverse = stop < start;
    let spec = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    let Some((_, _, inc)) = spec else {
        return 0.0;
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Start, step and bandwidth of `count` ordinal slots over `range`.
fn band_layout(
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
) -> (f64, f64, f64) {
    let (r0, r1) = range;
    let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
    let n = count as f64;
    let step = (stop - start) / (n - padding_inner + padding_outer * 2.0).max(1.0);
    let start = start + (stop - start - step * (n - padding_inner)) * align;
    (start, step, step * (1.0 - padding_inner))
}

/// A discrete point scale: `count` evenly spaced positions across a range.
///
/// With the default zero padding the first point sits on the start of the range and the last
/// on its end. A single point is centered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePoint {
    range: (f64, f64),
    count: usize,
    padding: f64,
    align: f64,
}

impl ScalePoint {
    /// Creates a new point scale with no padding and centered alignment.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: 0.0,
            align: 0.5,
        }
    }

    /// Sets the outer padding in point steps.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Sets how leftover space is distributed (`0.0` start, `0.5` center, `1.0` end).
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the number of points.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the distance between adjacent points.
    pub fn step(&self) -> f64 {
        band_layout(self.range, self.count, 1.0, self.padding, self.align).1
    }

    /// Returns the position of the point at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (start, step, _) = band_layout(self.range, self.count, 1.0, self.padding, self.align);
        let slot = if self.range.1 < self.range.0 {
            self.count.saturating_sub(1).saturating_sub(index)
        } else {
            index
        };
        start + step * slot as f64
    }
}

/// A discrete band scale: `count` equal-width bands across a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`, without padding.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Sets inner and outer padding in band steps.
    ///
    /// Inner padding is clamped to `0.0..=1.0`.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Sets how leftover space is distributed (`0.0` start, `0.5` center, `1.0` end).
    pub fn with_align(mut self, align: f64) -> Self {
        self.align = align.clamp(0.0, 1.0);
        self
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        self.layout().2
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.layout().1
    }

    /// Returns the start position of the band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (start, step, _) = self.layout();
        let slot = if self.range.1 < self.range.0 {
            self.count.saturating_sub(1).saturating_sub(index)
        } else {
            index
        };
        start + step * slot as f64
    }

    fn layout(&self) -> (f64, f64, f64) {
        band_layout(
            self.range,
            self.count,
            self.padding_inner,
            self.padding_outer,
            self.align,
        )
    }
}
