//! Level conversion math for the dynamics engine.
//!
//! The detector path works on the *squared* mono mixdown, so the dB
//! conversion uses a factor of 10 instead of 20 (`10*log10(x^2)` equals
//! `20*log10(|x|)`). Near-silent levels are floored at [`LEVEL_FLOOR_DB`]
//! instead of running `log10` toward negative infinity.

use libm::{log10f, powf};

/// Detector floor in dB. Squared levels at or below
/// [`SQUARED_LEVEL_EPSILON`] report this level.
pub const LEVEL_FLOOR_DB: f32 = -60.0;

/// Squared-level threshold below which the detector clamps to the floor.
pub const SQUARED_LEVEL_EPSILON: f32 = 1e-6;

/// Detector ceiling in dB, reported when the squared level overflows to
/// infinity: `10 * log10(f32::MAX)`, the loudest representable squared
/// level.
pub const LEVEL_OVERLOAD_DB: f32 = 385.32;

/// Convert decibels to linear gain (`10^(db/20)`).
///
/// # Example
/// ```rust
/// use compresor_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-6);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    powf(10.0, db * 0.05)
}

/// Convert linear gain to decibels (`20*log10(linear)`).
///
/// Inputs at or below zero are clamped to a very small positive value
/// rather than producing `-inf`/NaN.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    20.0 * log10f(linear.max(1e-10))
}

/// Convert a squared sample level to dB with the detector floor applied.
///
/// This is the compressor's level detector conversion: the input has
/// already been squared to discard sign, so the scale factor is 10.
/// NaN clamps to the floor so it can never reach the envelope memory;
/// an infinite squared level is an overload, not silence, and reads as
/// [`LEVEL_OVERLOAD_DB`] so the compressor clamps down instead of
/// releasing.
#[inline]
pub fn squared_to_db(squared: f32) -> f32 {
    if squared.is_nan() || squared <= SQUARED_LEVEL_EPSILON {
        LEVEL_FLOOR_DB
    } else if squared == f32::INFINITY {
        LEVEL_OVERLOAD_DB
    } else {
        10.0 * log10f(squared)
    }
}

/// Convert milliseconds to samples at the given sample rate.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}
