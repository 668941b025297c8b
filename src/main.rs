use curve_regularizer::types::{CircleParams, EllipseParams, RectangleParams};
use curve_regularizer::{Point, Regularizer, RegularizerParams};
use std::f64::consts::TAU;

fn main() {
    // Demo stub: a synthetic batch with one curve of each kind
    let circle = CircleParams {
        center: [2.0, 3.0],
        radius: 5.0,
    };
    let ellipse = EllipseParams {
        center: [20.0, 0.0],
        semi_axes: [6.0, 3.0],
        angle: 0.5,
    };
    let rect = RectangleParams {
        center: [-15.0, 5.0],
        width: 8.0,
        height: 4.0,
        angle: 0.3,
    };
    let batch: Vec<Vec<Vec<Point>>> = vec![
        vec![
            (0..10).map(|i| [i as f64, 0.5 * i as f64 - 1.0]).collect(),
            (0..24)
                .map(|k| circle.point_at(TAU * k as f64 / 24.0))
                .collect(),
        ],
        vec![
            (0..36)
                .map(|k| ellipse.point_at(TAU * k as f64 / 36.0))
                .collect(),
            rect.corners().to_vec(),
        ],
        vec![
            // Three samples of an occluded arc and a V shape.
            (0..3)
                .map(|k| circle.point_at(2.0 * k as f64))
                .map(|p| [p[0], p[1] - 20.0])
                .collect(),
            (-4..=4).map(|i| [i as f64, (i as f64).abs() - 30.0]).collect(),
        ],
    ];

    let regularizer = Regularizer::new(RegularizerParams::default());
    match regularizer.process(&batch) {
        Ok(report) => {
            println!(
                "curves={} kinds: {} latency_ms={:.3}",
                report.curve_count(),
                report.counts,
                report.timings.total_ms
            );
            if let Some(counts) = report.completion_counts {
                println!("after completion: {counts}");
            }
            if let Some(n) = report.symmetric_count() {
                println!("symmetric curves: {n}");
            }
        }
        Err(err) => eprintln!("Error: {err}"),
    }
}
