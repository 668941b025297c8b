//! Direct algebraic ellipse fit.
//!
//! Samples are centred and scaled (mean distance √2) before building the
//! 6×6 scatter matrix of `[x², xy, y², x, y, 1]`. The conic minimising the
//! algebraic error under `‖θ‖ = 1` is the eigenvector of the smallest
//! eigenvalue. The conic is then converted to centre, semi-axes and
//! rotation; anything that is not a real ellipse is rejected.

use super::{centroid, max_residual, mean_distance, FitResult, EPS};
use crate::angle::{max_polar_step, normalize_half_turn};
use crate::types::{EllipseParams, Point};
use nalgebra::{Matrix6, SymmetricEigen, Vector6};
use std::f64::consts::{FRAC_PI_2, SQRT_2};

pub const MIN_POINTS: usize = 5;

pub fn fit_ellipse(points: &[Point]) -> Option<FitResult<EllipseParams>> {
    if points.len() < MIN_POINTS {
        return None;
    }
    let origin = centroid(points);
    let spread = mean_distance(points, &origin);
    if !spread.is_finite() || spread <= EPS {
        return None;
    }
    let scale = SQRT_2 / spread;

    let mut scatter = Matrix6::zeros();
    for p in points {
        let x = (p[0] - origin[0]) * scale;
        let y = (p[1] - origin[1]) * scale;
        let row = Vector6::new(x * x, x * y, y * y, x, y, 1.0);
        scatter += row * row.transpose();
    }
    let eigen = SymmetricEigen::new(scatter);
    let (idx, _) = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?;
    let v = eigen.eigenvectors.column(idx);
    let conic = [v[0], v[1], v[2], v[3], v[4], v[5]];

    let (center, semi_axes, angle) = conic_to_ellipse(&conic)?;
    let params = EllipseParams {
        center: [
            origin[0] + center[0] / scale,
            origin[1] + center[1] / scale,
        ],
        semi_axes: [semi_axes[0] / scale, semi_axes[1] / scale],
        angle,
    };
    let parameters: Vec<f64> = points.iter().map(|p| params.parameter_of(p)).collect();
    Some(FitResult {
        params,
        max_residual: max_residual(points, |p| params.residual(p)),
        max_arc_gap: Some(max_polar_step(&parameters)),
    })
}

/// Converts `a x² + b xy + c y² + d x + e y + f = 0` to centre, semi-axes
/// (major first) and major-axis angle in `[0, π)`.
fn conic_to_ellipse(conic: &[f64; 6]) -> Option<(Point, [f64; 2], f64)> {
    let [a, b, c, d, e, f] = *conic;
    let den = 4.0 * a * c - b * b;
    // Elliptic conics have a positive-definite (or negative-definite)
    // quadratic part.
    if den <= EPS * (a * a + b * b + c * c) {
        return None;
    }
    let x0 = (b * e - 2.0 * c * d) / den;
    let y0 = (b * d - 2.0 * a * e) / den;
    let f0 = a * x0 * x0 + b * x0 * y0 + c * y0 * y0 + d * x0 + e * y0 + f;

    let mean = 0.5 * (a + c);
    let radius = (0.25 * (a - c) * (a - c) + 0.25 * b * b).sqrt();
    let lambda1 = mean + radius;
    let lambda2 = mean - radius;
    let phi1 = 0.5 * b.atan2(a - c);

    let axis1 = -f0 / lambda1;
    let axis2 = -f0 / lambda2;
    if !(axis1 > 0.0 && axis2 > 0.0 && axis1.is_finite() && axis2.is_finite()) {
        return None;
    }
    let (axis1, axis2) = (axis1.sqrt(), axis2.sqrt());
    let (semi_axes, angle) = if axis1 >= axis2 {
        ([axis1, axis2], phi1)
    } else {
        ([axis2, axis1], phi1 + FRAC_PI_2)
    };
    Some(([x0, y0], semi_axes, normalize_half_turn(angle)))
}
