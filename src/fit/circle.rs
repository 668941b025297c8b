//! Geometric circle fit by Levenberg–Marquardt.
//!
//! Minimises `Σ (|p_i − c| − r)²` over `(cx, cy, r)`, starting from the
//! centroid and the mean radial distance. The solver runs a fixed number of
//! iterations at most; running out of iterations, diverging to non-finite
//! values or collapsing the radius is reported as "no fit".

use super::{centroid, max_residual, mean_distance, FitResult, EPS};
use crate::angle::max_polar_step;
use crate::types::{CircleParams, Point};
use log::debug;
use nalgebra::{Matrix3, Vector3};

pub const MIN_POINTS: usize = 3;

const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MAX: f64 = 1e12;
const GRAD_TOL: f64 = 1e-12;
const STEP_TOL: f64 = 1e-12;

pub fn fit_circle(points: &[Point], max_iters: usize) -> Option<FitResult<CircleParams>> {
    if points.len() < MIN_POINTS {
        return None;
    }
    let c0 = centroid(points);
    let r0 = mean_distance(points, &c0);
    let x = solve_lm(points, Vector3::new(c0[0], c0[1], r0), max_iters)?;
    if !(x.iter().all(|v| v.is_finite()) && x[2] > EPS) {
        return None;
    }
    let params = CircleParams {
        center: [x[0], x[1]],
        radius: x[2],
    };
    let angles: Vec<f64> = points.iter().map(|p| params.angle_of(p)).collect();
    Some(FitResult {
        params,
        max_residual: max_residual(points, |p| params.residual(p)),
        max_arc_gap: Some(max_polar_step(&angles)),
    })
}

fn solve_lm(points: &[Point], init: Vector3<f64>, max_iters: usize) -> Option<Vector3<f64>> {
    let mut x = init;
    let mut cost = sum_squared_residuals(points, &x);
    if !cost.is_finite() {
        return None;
    }
    let mut lambda = LAMBDA_INIT;
    for iter in 0..max_iters {
        let (jtj, jtr) = normal_equations(points, &x);
        if jtr.amax() <= GRAD_TOL * (1.0 + x.amax()) * points.len() as f64 {
            return Some(x);
        }
        let mut damped = jtj;
        for i in 0..3 {
            damped[(i, i)] += lambda * jtj[(i, i)].max(EPS);
        }
        let Some(step) = damped.lu().solve(&(-jtr)) else {
            lambda *= 10.0;
            if lambda > LAMBDA_MAX {
                break;
            }
            continue;
        };
        let candidate = x + step;
        let candidate_cost = sum_squared_residuals(points, &candidate);
        if candidate_cost.is_finite() && candidate_cost < cost {
            x = candidate;
            cost = candidate_cost;
            lambda = (lambda * 0.1).max(1e-15);
            if step.amax() <= STEP_TOL * (1.0 + x.amax()) {
                return Some(x);
            }
        } else {
            lambda *= 10.0;
            if lambda > LAMBDA_MAX {
                // No descent direction left: already at the numerical minimum.
                debug!("circle fit: damping saturated after {iter} iterations, cost={cost:.3e}");
                return Some(x);
            }
        }
    }
    debug!("circle fit: no convergence within {max_iters} iterations, cost={cost:.3e}");
    None
}

fn sum_squared_residuals(points: &[Point], x: &Vector3<f64>) -> f64 {
    points
        .iter()
        .map(|p| {
            let r = (p[0] - x[0]).hypot(p[1] - x[1]) - x[2];
            r * r
        })
        .sum()
}

/// `JᵀJ` and `Jᵀr` for the radial residuals at `x`.
fn normal_equations(points: &[Point], x: &Vector3<f64>) -> (Matrix3<f64>, Vector3<f64>) {
    let mut jtj = Matrix3::zeros();
    let mut jtr = Vector3::zeros();
    for p in points {
        let dx = p[0] - x[0];
        let dy = p[1] - x[1];
        let d = dx.hypot(dy);
        let residual = d - x[2];
        let row = if d > EPS {
            Vector3::new(-dx / d, -dy / d, -1.0)
        } else {
            Vector3::new(0.0, 0.0, -1.0)
        };
        jtj += row * row.transpose();
        jtr += row * residual;
    }
    (jtj, jtr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn arc(center: Point, radius: f64, from: f64, to: f64, n: usize) -> Vec<Point> {
        (0..n)
            .map(|k| {
                let t = from + (to - from) * k as f64 / (n - 1) as f64;
                [center[0] + radius * t.cos(), center[1] + radius * t.sin()]
            })
            .collect()
    }

    #[test]
    fn full_circle_converges_immediately() {
        let pts = arc([2.0, 3.0], 5.0, 0.0, TAU * 11.0 / 12.0, 12);
        let fit = fit_circle(&pts, 100).expect("circle fit");
        assert!((fit.params.center[0] - 2.0).abs() < 1e-9);
        assert!((fit.params.center[1] - 3.0).abs() < 1e-9);
        assert!((fit.params.radius - 5.0).abs() < 1e-9);
        assert!(fit.max_residual < 1e-9);
    }

    #[test]
    fn quarter_arc_recovers_center() {
        let pts = arc([-4.0, 1.0], 3.0, 0.0, FRAC_PI_2, 25);
        let fit = fit_circle(&pts, 100).expect("circle fit");
        assert!((fit.params.center[0] + 4.0).abs() < 1e-6);
        assert!((fit.params.center[1] - 1.0).abs() < 1e-6);
        assert!((fit.params.radius - 3.0).abs() < 1e-6);
        let gap = fit.max_arc_gap.expect("conic gap");
        assert!(gap < 0.1);
    }

    #[test]
    fn collinear_points_do_not_converge() {
        let pts: Vec<Point> = (0..10).map(|i| [0.0, i as f64]).collect();
        if let Some(fit) = fit_circle(&pts, 100) {
            // Whatever the solver stops on, it cannot be a tight small circle.
            assert!(fit.params.radius > 10.0 || fit.max_residual > 0.1);
        }
    }

    #[test]
    fn requires_three_points() {
        assert!(fit_circle(&[[0.0, 0.0], [1.0, 1.0]], 100).is_none());
    }
}
