// Copyright 2025 the Streamview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Number of decimals needed to print multiples of `step` exactly (capped at 12).
pub(crate) fn precision_for_step(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let mut scaled = step;
    for p in 0..12 {
        if (scaled - scaled.round()).abs() <= 1e-9 * scaled.max(1.0) {
            return p;
        }
        scaled *= 10.0;
    }
    12
}

/// Formats a tick value with thousands separators and as many decimals as the tick `step`
/// needs (`1,000`, `2.5`, `−40`).
///
/// Negative values use U+2212 MINUS SIGN. Values that round to zero print without a sign.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    let precision = precision_for_step(step);
    let body = format!("{:.*}", precision, v.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body.as_str(), None),
    };

    let mut out = String::with_capacity(body.len() + int_part.len() / 3 + 3);
    if v < 0.0 && body.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('\u{2212}');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integers_get_grouped() {
        assert_eq!(format_tick_with_step(0.0, 200.0), "0");
        assert_eq!(format_tick_with_step(1000.0, 500.0), "1,000");
        assert_eq!(format_tick_with_step(1_234_567.0, 1.0), "1,234,567");
        assert_eq!(format_tick_with_step(999.0, 1.0), "999");
    }

    #[test]
    fn decimals_follow_step() {
        assert_eq!(format_tick_with_step(2.5, 0.5), "2.5");
        assert_eq!(format_tick_with_step(3.0, 0.5), "3.0");
        assert_eq!(format_tick_with_step(0.05, 0.05), "0.05");
    }

    #[test]
    fn negatives_use_minus_sign() {
        assert_eq!(format_tick_with_step(-2000.0, 1000.0), "\u{2212}2,000");
        assert_eq!(format_tick_with_step(-0.0001, 1.0), "0");
    }

    #[test]
    fn precision_is_stable_for_float_noise() {
        assert_eq!(precision_for_step(0.1 + 0.2), 1);
        assert_eq!(precision_for_step(20.0), 0);
        assert_eq!(precision_for_step(0.0), 0);
    }
}
