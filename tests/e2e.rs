mod common;

use common::init_logger;
use common::synthetic_curves::{
    arc_samples, circle_samples, ellipse_samples, rectangle_outline, spiral_samples,
    unit_square_corners,
};
use curve_regularizer::diagnostics::Stage;
use curve_regularizer::types::{EllipseParams, RectangleParams};
use curve_regularizer::{
    complete, detect_symmetry, regularize, CompletionParams, Curve, FitParams, Kind, Point,
    Regularizer, RegularizerParams, RotationOrder, Shape, SymmetryParams,
};

#[test]
fn exact_circle_is_classified_with_continuous_symmetry() {
    init_logger();
    let curve = regularize(circle_samples([-1.0, 4.0], 3.0, 36), &FitParams::default());
    let Shape::Circle(circle) = curve.shape() else {
        panic!("expected circle, got {}", curve.kind());
    };
    assert!((circle.center[0] + 1.0).abs() < 1e-6);
    assert!((circle.center[1] - 4.0).abs() < 1e-6);
    assert!((circle.radius - 3.0).abs() < 1e-6);

    let sym = detect_symmetry(&curve, &SymmetryParams::default());
    assert!(sym.has_reflection);
    assert_eq!(sym.rotation, RotationOrder::Infinite);
}

#[test]
fn twelve_point_circle_matches_reference_values() {
    let curve = regularize(circle_samples([2.0, 3.0], 5.0, 12), &FitParams::default());
    let Shape::Circle(circle) = curve.shape() else {
        panic!("expected circle, got {}", curve.kind());
    };
    assert!((circle.center[0] - 2.0).abs() < 1e-6 && (circle.center[1] - 3.0).abs() < 1e-6);
    assert!((circle.radius - 5.0).abs() < 1e-6);
    assert_eq!(
        detect_symmetry(&curve, &SymmetryParams::default()).rotation,
        RotationOrder::Infinite
    );
}

#[test]
fn tilted_ellipse_is_fitted_with_twofold_symmetry() {
    init_logger();
    let truth = EllipseParams {
        center: [1.0, -2.0],
        semi_axes: [5.0, 2.0],
        angle: 0.5,
    };
    let curve = regularize(ellipse_samples(&truth, 36), &FitParams::default());
    let Shape::Ellipse(ellipse) = curve.shape() else {
        panic!("expected ellipse, got {}", curve.kind());
    };
    assert!((ellipse.center[0] - 1.0).abs() < 1e-6);
    assert!((ellipse.center[1] + 2.0).abs() < 1e-6);
    assert!((ellipse.semi_axes[0] - 5.0).abs() < 1e-6);
    assert!((ellipse.semi_axes[1] - 2.0).abs() < 1e-6);
    assert!((ellipse.angle - 0.5).abs() < 1e-6);

    let sym = detect_symmetry(&curve, &SymmetryParams::default());
    assert!(sym.has_reflection);
    assert_eq!(sym.rotation, RotationOrder::Finite(2));
}

#[test]
fn evenly_spaced_circle_points_are_circles() {
    for n in 5..=12 {
        let curve = regularize(circle_samples([2.0, 3.0], 5.0, n), &FitParams::default());
        assert_eq!(curve.kind(), Kind::Circle, "n={n}");
    }
}

#[test]
fn square_outline_has_fourfold_symmetry() {
    let square = RectangleParams {
        center: [1.0, -2.0],
        width: 4.0,
        height: 4.0,
        angle: 0.2,
    };
    let curve = regularize(rectangle_outline(&square, 10), &FitParams::default());
    let Shape::Rectangle(rect) = curve.shape() else {
        panic!("expected rectangle, got {}", curve.kind());
    };
    assert!((rect.width - rect.height).abs() < 1e-9);

    let sym = detect_symmetry(&curve, &SymmetryParams::default());
    assert!(sym.has_reflection);
    assert_eq!(sym.rotation, RotationOrder::Finite(4));
}

#[test]
fn unit_square_corners_form_an_axis_aligned_square() {
    let curve = regularize(unit_square_corners(), &FitParams::default());
    let Shape::Rectangle(rect) = curve.shape() else {
        panic!("expected rectangle, got {}", curve.kind());
    };
    assert!((rect.width - 1.0).abs() < 1e-9);
    assert!((rect.height - 1.0).abs() < 1e-9);
    assert!(rect.angle.abs() < 1e-9);

    let sym = detect_symmetry(&curve, &SymmetryParams::default());
    assert!(sym.has_reflection);
    assert_eq!(sym.rotation, RotationOrder::Finite(4));
}

#[test]
fn low_curvature_arc_is_a_line() {
    let pts = arc_samples([0.0, -500.0], 500.0, 1.55, 0.0005, 40);
    assert_eq!(regularize(pts, &FitParams::default()).kind(), Kind::Line);
}

#[test]
fn completion_is_a_fixed_point() {
    let params = CompletionParams::default();
    // Three samples 2 rad apart are too sparse for any primitive.
    let curve = regularize(arc_samples([0.0, 0.0], 2.0, 0.0, 2.0, 3), &FitParams::default());
    assert_eq!(curve.kind(), Kind::Unknown);
    let once = complete(&curve, &params);
    assert_eq!(once.kind(), Kind::Completed);
    assert_eq!(complete(&once, &params), once);
}

#[test]
fn short_unknown_curves_complete_by_interpolation() {
    let params = CompletionParams::default();
    let two = complete(&Curve::unknown(vec![[0.0, 0.0], [1.0, 2.0]]), &params);
    assert_eq!(two.kind(), Kind::Completed);
    assert_eq!(two.completed_points().map(<[Point]>::len), Some(100));

    for pts in [Vec::<Point>::new(), vec![[4.0, 4.0]]] {
        assert_eq!(complete(&Curve::unknown(pts), &params).kind(), Kind::Unknown);
    }
}

#[test]
fn symmetry_search_is_deterministic() {
    let curve = Curve::unknown(spiral_samples(60));
    let params = SymmetryParams::default();
    let first = detect_symmetry(&curve, &params);
    let second = detect_symmetry(&curve, &params);
    assert_eq!(first, second);
    assert!(!first.has_reflection);
    assert_eq!(first.rotation, RotationOrder::Finite(1));
}

#[test]
fn batch_pipeline_reports_every_stage() {
    init_logger();
    let batch = vec![
        vec![
            circle_samples([0.0, 0.0], 5.0, 24),
            unit_square_corners(),
            vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]],
        ],
        vec![
            arc_samples([10.0, 10.0], 3.0, 0.0, 2.0, 3),
            vec![[7.0, 7.0]],
        ],
    ];
    let report = Regularizer::new(RegularizerParams::default())
        .process(&batch)
        .expect("batch");

    let kinds: Vec<Vec<Kind>> = report
        .paths
        .iter()
        .map(|p| p.iter().map(Curve::kind).collect())
        .collect();
    assert_eq!(
        kinds,
        vec![
            vec![Kind::Circle, Kind::Rectangle, Kind::Line],
            vec![Kind::Unknown, Kind::Unknown],
        ]
    );

    let symmetry = report.symmetry.as_ref().expect("symmetry stage ran");
    assert_eq!(symmetry[0].len(), 3);
    assert!(symmetry[0].iter().all(Option::is_some));
    // Single-sample curves are skipped.
    assert!(symmetry[1][1].is_none());

    let completed = report.completed.as_ref().expect("completion stage ran");
    assert_eq!(completed[1][0].kind(), Kind::Completed);
    assert_eq!(completed[1][1].kind(), Kind::Unknown);
    assert_eq!(completed[0], report.paths[0]);

    let counts = report.completion_counts.expect("completion counts");
    assert_eq!(counts.get(Kind::Completed), 1);
    assert_eq!(report.counts.total(), 5);
    assert!(report.stage_errors.is_empty());
    assert!(report.timings.stage_ms(Stage::Symmetry.as_str()).is_some());
}

#[test]
fn report_serializes_tagged_curves() {
    let batch = vec![vec![circle_samples([0.0, 0.0], 1.0, 16), vec![[0.0, 0.0], [1.0, 3.0]]]];
    let params = RegularizerParams {
        enable_symmetry: false,
        ..RegularizerParams::default()
    };
    let report = Regularizer::new(params).process(&batch).expect("batch");
    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["paths"][0][0]["kind"], "circle");
    assert_eq!(json["paths"][0][1]["kind"], "line");
    assert!(json["paths"][0][0]["radius"].as_f64().is_some());
    assert!(json.get("symmetry").is_none());
    assert_eq!(json["counts"]["circle"], 1);
}
