//! Curve completion engine.
//!
//! Unknown curves are treated as partially occluded and reconstructed by the
//! first model that explains the visible samples: a closed circle, a closed
//! ellipse, or failing both a natural cubic spline through the samples in
//! their given order. Every other kind passes through unchanged, which makes
//! [`complete`] idempotent.

mod params;
pub mod spline;

pub use params::CompletionParams;

use crate::fit::{fit_circle, fit_ellipse};
use crate::types::{Curve, Kind, Point};
use log::debug;
use std::f64::consts::TAU;
use std::sync::Arc;

/// Completes an Unknown curve; returns a copy of any other curve.
///
/// The result references the input through [`Curve::original`]. A
/// reconstruction identical to the input samples leaves the curve Unknown.
pub fn complete(curve: &Curve, params: &CompletionParams) -> Curve {
    if curve.kind() != Kind::Unknown {
        return curve.clone();
    }
    match reconstruct(curve.points(), params) {
        Some(points) if points.as_slice() != curve.points() => {
            Curve::completed(Arc::new(curve.clone()), points)
        }
        _ => curve.clone(),
    }
}

/// Reconstructed samples for `points`, or `None` when there are too few
/// samples for any model.
pub fn reconstruct(points: &[Point], params: &CompletionParams) -> Option<Vec<Point>> {
    let threshold = params.effective_threshold();
    let samples = params.sample_count;
    let angles = (0..samples).map(move |k| TAU * k as f64 / samples as f64);

    if let Some(fit) = fit_circle(points, params.fit.circle_max_iters)
        .filter(|f| f.max_residual < threshold)
    {
        debug!(
            "complete: circle n={} r={:.3}",
            points.len(),
            fit.params.radius
        );
        return Some(angles.map(|t| fit.params.point_at(t)).collect());
    }
    if let Some(fit) = fit_ellipse(points).filter(|f| f.max_residual < threshold) {
        debug!(
            "complete: ellipse n={} axes=({:.3}, {:.3})",
            points.len(),
            fit.params.semi_axes[0],
            fit.params.semi_axes[1]
        );
        return Some(angles.map(|t| fit.params.point_at(t)).collect());
    }
    let resampled = spline::resample(points, samples);
    if resampled.is_some() {
        debug!("complete: spline n={}", points.len());
    } else {
        debug!("complete: too few samples n={}", points.len());
    }
    resampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::{regularize, FitParams};
    use crate::types::{CircleParams, EllipseParams};

    #[test]
    fn two_points_complete_to_a_segment() {
        let curve = Curve::unknown(vec![[0.0, 0.0], [3.0, 6.0]]);
        let done = complete(&curve, &CompletionParams::default());
        assert_eq!(done.kind(), Kind::Completed);
        let pts = done.completed_points().expect("completed points");
        assert_eq!(pts.len(), 100);
        assert_eq!(pts[0], [0.0, 0.0]);
        assert!((pts[99][0] - 3.0).abs() < 1e-12 && (pts[99][1] - 6.0).abs() < 1e-12);
        assert_eq!(done.original(), Some(&curve));
    }

    #[test]
    fn fewer_than_two_points_stay_unknown() {
        let params = CompletionParams::default();
        for pts in [vec![], vec![[1.0, 2.0]]] {
            let curve = Curve::unknown(pts);
            let done = complete(&curve, &params);
            assert_eq!(done, curve);
        }
    }

    #[test]
    fn completion_is_idempotent() {
        let params = CompletionParams::default();
        let once = complete(&Curve::unknown(vec![[0.0, 1.0], [2.0, 5.0]]), &params);
        let twice = complete(&once, &params);
        assert_eq!(once, twice);
    }

    #[test]
    fn primitives_pass_through() {
        let curve = regularize(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]], &FitParams::default());
        assert_eq!(complete(&curve, &CompletionParams::default()), curve);
    }

    #[test]
    fn sparse_arc_closes_into_circle() {
        let truth = CircleParams {
            center: [1.0, 2.0],
            radius: 4.0,
        };
        // Steps of 2 rad exceed the fitter's arc-gap limit, so the arc is Unknown.
        let pts: Vec<Point> = (0..3).map(|k| truth.point_at(2.0 * k as f64)).collect();
        let curve = regularize(pts, &FitParams::default());
        assert_eq!(curve.kind(), Kind::Unknown);

        let done = complete(&curve, &CompletionParams::default());
        let completed = done.completed_points().expect("completed points");
        assert_eq!(completed.len(), 100);
        assert!(completed.iter().all(|p| truth.residual(p) < 1e-6));
    }

    #[test]
    fn half_ellipse_closes_into_ellipse() {
        let truth = EllipseParams {
            center: [0.0, 0.0],
            semi_axes: [4.0, 2.0],
            angle: 0.0,
        };
        let pts: Vec<Point> = (0..10)
            .map(|k| truth.point_at(std::f64::consts::PI * k as f64 / 9.0))
            .collect();
        let done = complete(&Curve::unknown(pts), &CompletionParams::default());
        let completed = done.completed_points().expect("completed points");
        assert_eq!(completed.len(), 100);
        assert!(completed.iter().all(|p| truth.residual(p) < 1e-6));
    }

    #[test]
    fn configured_threshold_admits_noisy_arc() {
        // Upper half circle of radius 5 with alternating ±0.5 radial noise.
        let pts: Vec<Point> = (0..15)
            .map(|k| {
                let t = 0.2 + 0.19 * k as f64;
                let r = if k % 2 == 0 { 5.5 } else { 4.5 };
                [r * t.cos(), r * t.sin()]
            })
            .collect();
        let curve = Curve::unknown(pts);

        // The fit threshold rejects both conics; the spline stays on the
        // visible side.
        let strict = complete(&curve, &CompletionParams::default());
        let spline = strict.completed_points().expect("completed points");
        assert_eq!(spline.len(), 100);
        assert!(spline.iter().all(|p| p[1] > 0.0));

        let loose = CompletionParams {
            threshold: Some(1.0),
            ..CompletionParams::default()
        };
        let done = complete(&curve, &loose);
        let closed = done.completed_points().expect("completed points");
        assert_eq!(closed.len(), 100);
        assert!(closed.iter().all(|p| (p[0].hypot(p[1]) - 5.0).abs() < 1.0));
        assert!(closed.iter().any(|p| p[1] < -3.5));
    }
}
