//! Ordinary least-squares line fit (y on x).

use super::{centroid, max_residual, FitResult};
use crate::types::{LineParams, Point};

pub const MIN_POINTS: usize = 2;

// Centred x spread at or below this, relative to the x magnitude, means the
// samples are vertical.
const SINGULAR_EPS: f64 = 1e-10;

/// Fit `y = m x + c` by least squares on mean-centred samples. The residual
/// is the perpendicular point-to-line distance.
///
/// Returns `None` for fewer than [`MIN_POINTS`] samples or when all samples
/// share the same x (the normal equations are singular).
pub fn fit_line(points: &[Point]) -> Option<FitResult<LineParams>> {
    if points.len() < MIN_POINTS {
        return None;
    }
    let mean = centroid(points);
    let mut accum = CentredMoments::default();
    for p in points {
        accum.accumulate(p, &mean);
    }
    let scale = points.iter().fold(0.0, |acc: f64, p| acc.max(p[0].abs()));
    let floor = points.len() as f64 * (SINGULAR_EPS * scale).powi(2);
    if !(accum.sxx.is_finite() && accum.sxy.is_finite()) || accum.sxx <= floor {
        return None;
    }
    let slope = accum.sxy / accum.sxx;
    let params = LineParams {
        slope,
        intercept: mean[1] - slope * mean[0],
    };
    Some(FitResult {
        params,
        max_residual: max_residual(points, |p| params.distance(p)),
        max_arc_gap: None,
    })
}

/// Second moments about the centroid; the normal equations reduce to
/// `m = Sxy / Sxx`.
#[derive(Default)]
struct CentredMoments {
    sxx: f64,
    sxy: f64,
}

impl CentredMoments {
    fn accumulate(&mut self, p: &Point, mean: &Point) {
        let dx = p[0] - mean[0];
        self.sxx += dx * dx;
        self.sxy += dx * (p[1] - mean[1]);
    }
}
