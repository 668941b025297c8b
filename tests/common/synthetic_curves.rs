use curve_regularizer::types::{CircleParams, EllipseParams, RectangleParams};
use curve_regularizer::Point;
use std::f64::consts::TAU;

/// `n` samples evenly spaced around a full circle, starting at angle 0.
pub fn circle_samples(center: Point, radius: f64, n: usize) -> Vec<Point> {
    let circle = CircleParams { center, radius };
    (0..n)
        .map(|k| circle.point_at(TAU * k as f64 / n as f64))
        .collect()
}

/// `n` samples on an arc from `start` with angular `step` (radians).
pub fn arc_samples(center: Point, radius: f64, start: f64, step: f64, n: usize) -> Vec<Point> {
    let circle = CircleParams { center, radius };
    (0..n)
        .map(|k| circle.point_at(start + step * k as f64))
        .collect()
}

pub fn ellipse_samples(ellipse: &EllipseParams, n: usize) -> Vec<Point> {
    (0..n)
        .map(|k| ellipse.point_at(TAU * k as f64 / n as f64))
        .collect()
}

/// Closed outline of `rect` with `per_side` samples on every side.
pub fn rectangle_outline(rect: &RectangleParams, per_side: usize) -> Vec<Point> {
    assert!(per_side > 0, "need at least one sample per side");
    let corners = rect.corners();
    let mut pts = Vec::with_capacity(4 * per_side);
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        for k in 0..per_side {
            let t = k as f64 / per_side as f64;
            pts.push([a[0] + t * (b[0] - a[0]), a[1] + t * (b[1] - a[1])]);
        }
    }
    pts
}

pub fn unit_square_corners() -> Vec<Point> {
    vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
}

/// Archimedean spiral `r = 1 + 0.8 θ` over one and a half turns. It has no
/// mirror axis and no rotational symmetry.
pub fn spiral_samples(n: usize) -> Vec<Point> {
    (0..n)
        .map(|k| {
            let theta = 3.0 * std::f64::consts::PI * k as f64 / (n - 1) as f64;
            let r = 1.0 + 0.8 * theta;
            [r * theta.cos(), r * theta.sin()]
        })
        .collect()
}
