//! Symmetry analyzer.
//!
//! Recognised primitives get their symmetry in closed form. Unknown curves,
//! and completed curves (which are analysed through their original samples,
//! never the reconstruction), go through the brute-force search in
//! [`search`].

mod params;
pub mod search;

pub use params::SymmetryParams;

use crate::fit::centroid;
use crate::types::{Curve, Point, ReflectionAxis, RotationOrder, Shape, SymmetryResult};
use log::debug;

/// Reflection and rotation symmetry of `curve`.
pub fn detect_symmetry(curve: &Curve, params: &SymmetryParams) -> SymmetryResult {
    match curve.shape() {
        Shape::Line(line) => {
            let c = centroid(curve.points());
            let norm = line.slope.hypot(1.0);
            SymmetryResult {
                has_reflection: true,
                rotation: RotationOrder::Finite(2),
                axis: Some(ReflectionAxis {
                    point: [c[0], line.y_at(c[0])],
                    direction: [1.0 / norm, line.slope / norm],
                }),
            }
        }
        Shape::Circle(circle) => SymmetryResult {
            has_reflection: true,
            rotation: RotationOrder::Infinite,
            axis: Some(ReflectionAxis {
                point: circle.center,
                direction: [1.0, 0.0],
            }),
        },
        Shape::Ellipse(ellipse) => {
            let [a, b] = ellipse.semi_axes;
            let (sin, cos) = ellipse.angle.sin_cos();
            SymmetryResult {
                has_reflection: true,
                rotation: if params.is_close(a, b) {
                    RotationOrder::Infinite
                } else {
                    RotationOrder::Finite(2)
                },
                axis: Some(ReflectionAxis {
                    point: ellipse.center,
                    direction: [cos, sin],
                }),
            }
        }
        Shape::Rectangle(rect) => {
            let (sin, cos) = rect.angle.sin_cos();
            SymmetryResult {
                has_reflection: true,
                rotation: if params.is_close(rect.width, rect.height) {
                    RotationOrder::Finite(4)
                } else {
                    RotationOrder::Finite(2)
                },
                axis: Some(ReflectionAxis {
                    point: rect.center,
                    direction: [cos, sin],
                }),
            }
        }
        Shape::Unknown => search_symmetry(curve.points(), params),
        Shape::Completed { original, .. } => search_symmetry(original.points(), params),
    }
}

/// Like [`detect_symmetry`], but skips curves whose symmetry has to be
/// searched and that have fewer than [`SymmetryParams::min_points`] samples.
pub fn try_detect_symmetry(curve: &Curve, params: &SymmetryParams) -> Option<SymmetryResult> {
    let searched = match curve.shape() {
        Shape::Unknown => Some(curve.points()),
        Shape::Completed { original, .. } => Some(original.points()),
        _ => None,
    };
    match searched {
        Some(points) if points.len() < params.min_points.max(1) => {
            debug!(
                "symmetry: skipping {} curve with {} samples",
                curve.kind(),
                points.len()
            );
            None
        }
        _ => Some(detect_symmetry(curve, params)),
    }
}

/// Numerical reflection and rotation search over raw samples.
pub fn search_symmetry(points: &[Point], params: &SymmetryParams) -> SymmetryResult {
    if points.is_empty() {
        return SymmetryResult::none();
    }
    let c = centroid(points);
    let centered: Vec<Point> = points.iter().map(|p| [p[0] - c[0], p[1] - c[1]]).collect();

    let reflection = search::best_reflection(&centered, params.reflection_angles)
        .filter(|best| best.score < params.threshold);
    let rotation = search::best_rotation(&centered, params.max_rotation_order)
        .filter(|best| best.score < params.threshold);

    debug!(
        "symmetry: n={} reflection={:?} rotation={:?}",
        points.len(),
        reflection.map(|r| (r.angle.to_degrees(), r.score)),
        rotation.map(|r| (r.order, r.score))
    );

    SymmetryResult {
        has_reflection: reflection.is_some(),
        rotation: RotationOrder::Finite(rotation.map_or(1, |r| r.order)),
        axis: reflection.map(|r| ReflectionAxis {
            point: c,
            direction: r.axis_direction(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CircleParams, EllipseParams, LineParams, RectangleParams};
    use std::sync::Arc;

    fn primitive(shape: Shape) -> Curve {
        Curve::primitive(Arc::from(vec![[0.0, 0.0], [1.0, 1.0]]), shape)
    }

    #[test]
    fn closed_form_rules() {
        let params = SymmetryParams::default();
        let line = primitive(Shape::Line(LineParams {
            slope: 1.0,
            intercept: 0.0,
        }));
        let res = detect_symmetry(&line, &params);
        assert!(res.has_reflection);
        assert_eq!(res.rotation, RotationOrder::Finite(2));

        let circle = primitive(Shape::Circle(CircleParams {
            center: [0.0, 0.0],
            radius: 1.0,
        }));
        assert_eq!(
            detect_symmetry(&circle, &params).rotation,
            RotationOrder::Infinite
        );

        let round = primitive(Shape::Ellipse(EllipseParams {
            center: [0.0, 0.0],
            semi_axes: [2.0, 2.0 + 1e-7],
            angle: 0.3,
        }));
        assert_eq!(
            detect_symmetry(&round, &params).rotation,
            RotationOrder::Infinite
        );
        let oval = primitive(Shape::Ellipse(EllipseParams {
            center: [0.0, 0.0],
            semi_axes: [3.0, 2.0],
            angle: 0.3,
        }));
        assert_eq!(
            detect_symmetry(&oval, &params).rotation,
            RotationOrder::Finite(2)
        );

        let oblong = primitive(Shape::Rectangle(RectangleParams {
            center: [0.0, 0.0],
            width: 3.0,
            height: 1.0,
            angle: 0.0,
        }));
        let res = detect_symmetry(&oblong, &params);
        assert!(res.has_reflection);
        assert_eq!(res.rotation, RotationOrder::Finite(2));
    }

    #[test]
    fn unknown_v_shape_has_mirror_but_no_rotation() {
        let pts: Vec<Point> = (-5..=5).map(|i| [i as f64, (i as f64).abs()]).collect();
        let res = detect_symmetry(&Curve::unknown(pts), &SymmetryParams::default());
        assert!(res.has_reflection);
        assert_eq!(res.rotation, RotationOrder::Finite(1));
        let axis = res.axis.expect("mirror axis");
        assert!(axis.direction[0].abs() < 1e-9);
    }

    #[test]
    fn completed_curve_is_analysed_through_its_original() {
        let pts: Vec<Point> = (-3..=3).map(|i| [i as f64, (i * i) as f64]).collect();
        let original = Arc::new(Curve::unknown(pts));
        let completed = Curve::completed(original.clone(), vec![[0.0, 0.0]; 100]);
        let params = SymmetryParams::default();
        assert_eq!(
            detect_symmetry(&completed, &params),
            detect_symmetry(&original, &params)
        );
    }

    #[test]
    fn empty_curve_is_skipped_by_batch_helper() {
        let params = SymmetryParams::default();
        assert!(try_detect_symmetry(&Curve::unknown(Vec::<Point>::new()), &params).is_none());
        assert!(try_detect_symmetry(&Curve::unknown(vec![[1.0, 1.0]]), &params).is_none());
        assert_eq!(search_symmetry(&[], &params), SymmetryResult::none());
    }
}
