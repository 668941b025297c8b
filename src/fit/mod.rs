//! Primitive classifier/fitter.
//!
//! [`regularize`] tries the primitive families in a fixed priority order
//! (line → circle → ellipse → rectangle) and reports the first one whose
//! maximum residual stays below [`FitParams::threshold`]. Every family exposes
//! a `fit_*` function returning a [`FitResult`], which the completion engine
//! reuses instead of recomputing residuals.
//!
//! A fit that cannot be attempted (too few points), that degenerates, or that
//! does not converge within its iteration cap is simply "no match"; nothing in
//! this module panics or returns an error.

pub mod circle;
pub mod ellipse;
pub mod line;
pub mod params;
pub mod rectangle;

pub use circle::fit_circle;
pub use ellipse::fit_ellipse;
pub use line::fit_line;
pub use params::{FitParams, RectangleResidual};
pub use rectangle::fit_rectangle;

use crate::types::{Curve, Point, PointSequence, Shape};
use log::debug;

const EPS: f64 = 1e-12;

/// Fitted parameters of one primitive together with the residual statistics
/// used to accept or reject it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult<P> {
    pub params: P,
    /// Largest per-point residual (see each primitive for its definition).
    pub max_residual: f64,
    /// Largest angular step between consecutive samples, for conic fits.
    pub max_arc_gap: Option<f64>,
}

impl<P> FitResult<P> {
    /// Residual (and, for conics, sampling density) acceptance test. Both
    /// bounds are exclusive.
    pub fn accepts(&self, threshold: f64, max_arc_gap_rad: f64) -> bool {
        self.max_residual < threshold
            && self.max_arc_gap.map_or(true, |gap| gap < max_arc_gap_rad)
    }
}

/// Classify `points` as the first matching primitive in priority order.
pub fn regularize(points: impl Into<PointSequence>, params: &FitParams) -> Curve {
    let points = points.into();
    match classify(&points, params) {
        Some(shape) => Curve::primitive(points, shape),
        None => Curve::unknown(points),
    }
}

/// [`regularize`] with [`FitParams::default`].
pub fn regularize_default(points: impl Into<PointSequence>) -> Curve {
    regularize(points, &FitParams::default())
}

/// Shape of the first primitive that explains `points`, or `None`.
pub fn classify(points: &[Point], params: &FitParams) -> Option<Shape> {
    let threshold = params.threshold;
    let max_gap = params.max_arc_gap_rad();

    if let Some(fit) = fit_line(points).filter(|f| f.accepts(threshold, max_gap)) {
        debug!(
            "regularize: line n={} max_residual={:.4}",
            points.len(),
            fit.max_residual
        );
        return Some(Shape::Line(fit.params));
    }
    if let Some(fit) =
        fit_circle(points, params.circle_max_iters).filter(|f| f.accepts(threshold, max_gap))
    {
        debug!(
            "regularize: circle n={} r={:.3} max_residual={:.4}",
            points.len(),
            fit.params.radius,
            fit.max_residual
        );
        return Some(Shape::Circle(fit.params));
    }
    if let Some(fit) = fit_ellipse(points).filter(|f| f.accepts(threshold, max_gap)) {
        debug!(
            "regularize: ellipse n={} axes=({:.3}, {:.3}) max_residual={:.4}",
            points.len(),
            fit.params.semi_axes[0],
            fit.params.semi_axes[1],
            fit.max_residual
        );
        return Some(Shape::Ellipse(fit.params));
    }
    if let Some(fit) =
        fit_rectangle(points, params.rectangle_residual).filter(|f| f.accepts(threshold, max_gap))
    {
        debug!(
            "regularize: rectangle n={} {:.3}x{:.3} max_residual={:.4}",
            points.len(),
            fit.params.width,
            fit.params.height,
            fit.max_residual
        );
        return Some(Shape::Rectangle(fit.params));
    }
    debug!("regularize: unknown n={}", points.len());
    None
}

pub(crate) fn centroid(points: &[Point]) -> Point {
    let n = points.len().max(1) as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
    [sx / n, sy / n]
}

pub(crate) fn mean_distance(points: &[Point], center: &Point) -> f64 {
    let n = points.len().max(1) as f64;
    points
        .iter()
        .map(|p| (p[0] - center[0]).hypot(p[1] - center[1]))
        .sum::<f64>()
        / n
}

fn max_residual(points: &[Point], residual: impl Fn(&Point) -> f64) -> f64 {
    // NaN propagates so non-finite input never passes a threshold.
    points.iter().map(residual).fold(0.0, |acc: f64, r| {
        if r.is_nan() || acc.is_nan() {
            f64::NAN
        } else {
            acc.max(r)
        }
    })
}
