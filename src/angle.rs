//! Angle utilities used by the primitive fits.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_turn(angle: f64) -> f64 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-9 {
        0.0
    } else {
        norm
    }
}

/// Computes the smallest unsigned angular difference between two angles,
/// treating antipodal directions as equivalent (i.e. π apart → 0).
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Unsigned step between two polar angles on the full circle, in [0, π].
#[inline]
pub fn polar_step(a: f64, b: f64) -> f64 {
    let diff = (b - a).rem_euclid(TAU);
    diff.min(TAU - diff)
}

/// Largest polar step between consecutive angles of an ordered sequence.
pub fn max_polar_step(angles: &[f64]) -> f64 {
    angles
        .windows(2)
        .map(|w| polar_step(w[0], w[1]))
        .fold(0.0, f64::max)
}
