//! Scalar helpers shared by the formula laws and the scene models.

use std::f64::consts::PI;

/// Decimal places kept for every computed value.
pub const PRECISION: i32 = 6;

/// Rounds `value` to [`PRECISION`] decimal places.
///
/// Values whose scaled form is past 2^53 already have no representable
/// digits at that precision and are returned unchanged, which keeps huge
/// magnitudes finite.
pub fn round6(value: f64) -> f64 {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    let factor = 10f64.powi(PRECISION);
    let scaled = value * factor;
    if scaled.is_nan() || scaled.abs() >= EXACT {
        return value;
    }
    scaled.round() / factor
}

pub fn radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}
