//! Minimum-area bounding rectangle.
//!
//! The rectangle is found by sweeping the edge directions of the convex hull
//! (one side of the optimal rectangle is always collinear with a hull edge).
//! Ties keep the first hull edge in counter-clockwise order starting from the
//! lowest-x vertex.

use super::{max_residual, FitResult, RectangleResidual, EPS};
use crate::angle::normalize_half_turn;
use crate::types::{Point, RectangleParams};
use std::f64::consts::FRAC_PI_2;

pub const MIN_POINTS: usize = 4;

const ANGLE_EPS: f64 = 1e-9;

/// Fit the minimum-area rectangle enclosing `points`.
///
/// Points are scored as chosen by `residual`; with the signed excess every
/// point is inside or on the rectangle by construction, so the residual is at
/// most zero for finite input. Degenerate hulls (fewer than three vertices or
/// zero area) are rejected.
pub fn fit_rectangle(
    points: &[Point],
    residual: RectangleResidual,
) -> Option<FitResult<RectangleParams>> {
    if points.len() < MIN_POINTS {
        return None;
    }
    let hull = convex_hull(points);
    if hull.len() < 3 {
        return None;
    }

    let mut best: Option<(f64, RectangleParams)> = None;
    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        let len = (b[0] - a[0]).hypot(b[1] - a[1]);
        if len <= EPS {
            continue;
        }
        let u = [(b[0] - a[0]) / len, (b[1] - a[1]) / len];
        let v = [-u[1], u[0]];
        let (mut min_u, mut max_u) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_v, mut max_v) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &hull {
            let pu = p[0] * u[0] + p[1] * u[1];
            let pv = p[0] * v[0] + p[1] * v[1];
            min_u = min_u.min(pu);
            max_u = max_u.max(pu);
            min_v = min_v.min(pv);
            max_v = max_v.max(pv);
        }
        let width = max_u - min_u;
        let height = max_v - min_v;
        let area = width * height;
        if best.as_ref().map_or(true, |(best_area, _)| area < *best_area) {
            let mid_u = 0.5 * (min_u + max_u);
            let mid_v = 0.5 * (min_v + max_v);
            let center = [mid_u * u[0] + mid_v * v[0], mid_u * u[1] + mid_v * v[1]];
            let rect = canonical(center, width, height, u[1].atan2(u[0]));
            best = Some((area, rect));
        }
    }

    let (area, params) = best?;
    let extent = params.width.max(params.height);
    if !area.is_finite() || area <= EPS * extent * extent || params.height <= EPS {
        return None;
    }
    Some(FitResult {
        params,
        max_residual: match residual {
            RectangleResidual::SignedExcess => max_residual(points, |p| params.signed_excess(p)),
            RectangleResidual::Boundary => max_residual(points, |p| params.boundary_distance(p)),
        },
        max_arc_gap: None,
    })
}

/// Folds the width direction into `[0, π/2)`, swapping width and height when
/// the direction is turned by a quarter.
fn canonical(center: Point, width: f64, height: f64, direction: f64) -> RectangleParams {
    let angle = normalize_half_turn(direction);
    let (angle, width, height) = if angle >= FRAC_PI_2 - ANGLE_EPS {
        ((angle - FRAC_PI_2).max(0.0), height, width)
    } else {
        (angle, width, height)
    };
    RectangleParams {
        center,
        width,
        height,
        angle,
    }
}

/// Andrew's monotone chain; returns the hull counter-clockwise without
/// collinear vertices.
pub(crate) fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted: Vec<Point> = points
        .iter()
        .copied()
        .filter(|p| p[0].is_finite() && p[1].is_finite())
        .collect();
    sorted.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let cross = |o: &Point, a: &Point, b: &Point| {
        (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0])
    };
    let mut hull: Vec<Point> = Vec::with_capacity(2 * sorted.len());
    for p in sorted.iter() {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    let lower_len = hull.len() + 1;
    for p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_is_axis_aligned() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let fit = fit_rectangle(&pts, RectangleResidual::SignedExcess).expect("rectangle fit");
        assert_eq!(fit.params.angle, 0.0);
        assert!((fit.params.width - 1.0).abs() < 1e-12);
        assert!((fit.params.height - 1.0).abs() < 1e-12);
        assert!(fit.max_residual < 1e-12);
    }

    #[test]
    fn rotated_rectangle_outline() {
        let truth = RectangleParams {
            center: [3.0, 4.0],
            width: 6.0,
            height: 2.0,
            angle: 0.4,
        };
        let corners = truth.corners();
        let mut pts = Vec::new();
        for i in 0..4 {
            let a = corners[i];
            let b = corners[(i + 1) % 4];
            for k in 0..10 {
                let t = k as f64 / 10.0;
                pts.push([a[0] + t * (b[0] - a[0]), a[1] + t * (b[1] - a[1])]);
            }
        }
        let fit = fit_rectangle(&pts, RectangleResidual::SignedExcess).expect("rectangle fit");
        assert!((fit.params.angle - 0.4).abs() < 1e-9);
        assert!((fit.params.width - 6.0).abs() < 1e-9);
        assert!((fit.params.height - 2.0).abs() < 1e-9);
        assert!((fit.params.center[0] - 3.0).abs() < 1e-9);
        assert!((fit.params.center[1] - 4.0).abs() < 1e-9);
        assert!(fit.max_residual < 1e-9);
    }

    #[test]
    fn interior_points_count_only_for_boundary_residual() {
        let pts = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [2.0, 2.0]];
        let signed = fit_rectangle(&pts, RectangleResidual::SignedExcess).expect("rectangle fit");
        assert!(signed.max_residual.abs() < 1e-9);
        let boundary = fit_rectangle(&pts, RectangleResidual::Boundary).expect("rectangle fit");
        assert!((boundary.max_residual - 2.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let pts: Vec<Point> = (0..6).map(|i| [0.0, i as f64]).collect();
        assert!(fit_rectangle(&pts, RectangleResidual::SignedExcess).is_none());
    }

    #[test]
    fn hull_drops_interior_and_collinear_points() {
        let pts = [
            [0.0, 0.0],
            [1.0, 0.0],
            [2.0, 0.0],
            [2.0, 2.0],
            [1.0, 1.0],
            [0.0, 2.0],
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull, vec![[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
    }
}
