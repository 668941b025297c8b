//! Data model shared by the fitter, the symmetry analyzer and the completion
//! engine.
//!
//! A [`Curve`] always keeps the raw samples it was built from. Its [`Shape`]
//! is a tagged union: fitted parameters exist only for the four primitive
//! variants, and only [`Shape::Completed`] carries reconstructed samples plus
//! a shared reference to the pre-completion curve.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A 2D sample `[x, y]`.
pub type Point = [f64; 2];

/// Ordered samples of one curve. Shared so a completed curve and its original
/// reference the same buffer.
pub type PointSequence = Arc<[Point]>;

/// An ordered group of curves extracted together (e.g. one traced contour).
pub type Path = Vec<Curve>;

/// Least-squares line `y = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineParams {
    pub slope: f64,
    pub intercept: f64,
}

impl LineParams {
    /// Line representation: ax + by + c = 0, with sqrt(a^2+b^2)=1
    pub fn normal_form(&self) -> [f64; 3] {
        let norm = (self.slope * self.slope + 1.0).sqrt();
        [self.slope / norm, -1.0 / norm, self.intercept / norm]
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance(&self, p: &Point) -> f64 {
        let [a, b, c] = self.normal_form();
        (a * p[0] + b * p[1] + c).abs()
    }

    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleParams {
    pub center: Point,
    pub radius: f64,
}

impl CircleParams {
    /// Absolute radial residual `| |p - c| - r |`.
    pub fn residual(&self, p: &Point) -> f64 {
        let dx = p[0] - self.center[0];
        let dy = p[1] - self.center[1];
        ((dx * dx + dy * dy).sqrt() - self.radius).abs()
    }

    pub fn point_at(&self, theta: f64) -> Point {
        [
            self.center[0] + self.radius * theta.cos(),
            self.center[1] + self.radius * theta.sin(),
        ]
    }

    /// Polar angle of `p` around the center.
    pub fn angle_of(&self, p: &Point) -> f64 {
        (p[1] - self.center[1]).atan2(p[0] - self.center[0])
    }
}

/// Ellipse with semi-axes `[a, b]`; `a` lies along the direction `angle`
/// (radians, counter-clockwise from +x).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseParams {
    pub center: Point,
    pub semi_axes: [f64; 2],
    pub angle: f64,
}

impl EllipseParams {
    /// Coordinates of `p` in the ellipse frame (center at origin, `a` along +x).
    pub fn to_local(&self, p: &Point) -> [f64; 2] {
        let (sin, cos) = self.angle.sin_cos();
        let dx = p[0] - self.center[0];
        let dy = p[1] - self.center[1];
        [dx * cos + dy * sin, -dx * sin + dy * cos]
    }

    /// Normalized quadratic-form residual `|x'^2/a^2 + y'^2/b^2 - 1|`.
    pub fn residual(&self, p: &Point) -> f64 {
        let [xr, yr] = self.to_local(p);
        let [a, b] = self.semi_axes;
        ((xr * xr) / (a * a) + (yr * yr) / (b * b) - 1.0).abs()
    }

    /// Eccentric-anomaly parameter of `p`.
    pub fn parameter_of(&self, p: &Point) -> f64 {
        let [xr, yr] = self.to_local(p);
        (yr / self.semi_axes[1]).atan2(xr / self.semi_axes[0])
    }

    pub fn point_at(&self, t: f64) -> Point {
        let (sin, cos) = self.angle.sin_cos();
        let u = self.semi_axes[0] * t.cos();
        let v = self.semi_axes[1] * t.sin();
        [
            self.center[0] + u * cos - v * sin,
            self.center[1] + u * sin + v * cos,
        ]
    }
}

/// Oriented rectangle; `width` is measured along `angle` (radians in
/// `[0, π/2)`), `height` perpendicular to it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleParams {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl RectangleParams {
    pub fn to_local(&self, p: &Point) -> [f64; 2] {
        let (sin, cos) = self.angle.sin_cos();
        let dx = p[0] - self.center[0];
        let dy = p[1] - self.center[1];
        [dx * cos + dy * sin, -dx * sin + dy * cos]
    }

    /// Signed excess of `p` beyond the half-extents. Zero on the boundary,
    /// negative inside.
    pub fn signed_excess(&self, p: &Point) -> f64 {
        let [xr, yr] = self.to_local(p);
        (xr.abs() - 0.5 * self.width).max(yr.abs() - 0.5 * self.height)
    }

    /// Distance from `p` to the rectangle boundary.
    pub fn boundary_distance(&self, p: &Point) -> f64 {
        self.signed_excess(p).abs()
    }

    /// Corners in counter-clockwise order starting at local (-w/2, -h/2).
    pub fn corners(&self) -> [Point; 4] {
        let (sin, cos) = self.angle.sin_cos();
        let hw = 0.5 * self.width;
        let hh = 0.5 * self.height;
        [[-hw, -hh], [hw, -hh], [hw, hh], [-hw, hh]].map(|[u, v]| {
            [
                self.center[0] + u * cos - v * sin,
                self.center[1] + u * sin + v * cos,
            ]
        })
    }
}

/// Classification tag without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Line,
    Circle,
    Ellipse,
    Rectangle,
    Unknown,
    Completed,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Line,
        Kind::Circle,
        Kind::Ellipse,
        Kind::Rectangle,
        Kind::Unknown,
        Kind::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Line => "line",
            Kind::Circle => "circle",
            Kind::Ellipse => "ellipse",
            Kind::Rectangle => "rectangle",
            Kind::Unknown => "unknown",
            Kind::Completed => "completed",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of a [`Curve`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Line(LineParams),
    Circle(CircleParams),
    Ellipse(EllipseParams),
    Rectangle(RectangleParams),
    Unknown,
    Completed {
        #[serde(rename = "completedPoints")]
        completed_points: Vec<Point>,
        original: Arc<Curve>,
    },
}

/// Unit of classification: raw samples plus their interpretation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Curve {
    points: PointSequence,
    #[serde(flatten)]
    shape: Shape,
}

impl Curve {
    /// A fitted primitive over `points`. `Completed` is rejected here; use
    /// the completion engine to build one.
    pub(crate) fn primitive(points: PointSequence, shape: Shape) -> Self {
        debug_assert!(!matches!(shape, Shape::Completed { .. }));
        Self { points, shape }
    }

    pub fn unknown(points: impl Into<PointSequence>) -> Self {
        Self {
            points: points.into(),
            shape: Shape::Unknown,
        }
    }

    /// Wraps an Unknown curve with its reconstruction. The samples of the new
    /// curve are the original samples.
    pub(crate) fn completed(original: Arc<Curve>, completed_points: Vec<Point>) -> Self {
        debug_assert_eq!(original.kind(), Kind::Unknown);
        Self {
            points: original.points.clone(),
            shape: Shape::Completed {
                completed_points,
                original,
            },
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> Kind {
        match self.shape {
            Shape::Line(_) => Kind::Line,
            Shape::Circle(_) => Kind::Circle,
            Shape::Ellipse(_) => Kind::Ellipse,
            Shape::Rectangle(_) => Kind::Rectangle,
            Shape::Unknown => Kind::Unknown,
            Shape::Completed { .. } => Kind::Completed,
        }
    }

    pub fn completed_points(&self) -> Option<&[Point]> {
        match &self.shape {
            Shape::Completed {
                completed_points, ..
            } => Some(completed_points),
            _ => None,
        }
    }

    pub fn original(&self) -> Option<&Curve> {
        match &self.shape {
            Shape::Completed { original, .. } => Some(original),
            _ => None,
        }
    }
}

/// Rotational symmetry order; `Infinite` means continuous symmetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationOrder {
    Finite(u32),
    Infinite,
}

impl RotationOrder {
    /// `true` for any order above one.
    pub fn is_symmetric(self) -> bool {
        match self {
            RotationOrder::Finite(n) => n > 1,
            RotationOrder::Infinite => true,
        }
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationOrder::Finite(n) => write!(f, "{n}"),
            RotationOrder::Infinite => f.write_str("inf"),
        }
    }
}

/// Mirror axis through `point` along unit `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionAxis {
    pub point: Point,
    pub direction: [f64; 2],
}

impl ReflectionAxis {
    /// Line representation: ax + by + c = 0, with sqrt(a^2+b^2)=1
    pub fn normal_form(&self) -> [f64; 3] {
        let a = -self.direction[1];
        let b = self.direction[0];
        [a, b, -(a * self.point[0] + b * self.point[1])]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryResult {
    pub has_reflection: bool,
    pub rotation: RotationOrder,
    /// Mirror axis when one is known in closed form or was found by search.
    pub axis: Option<ReflectionAxis>,
}

impl SymmetryResult {
    pub fn none() -> Self {
        Self {
            has_reflection: false,
            rotation: RotationOrder::Finite(1),
            axis: None,
        }
    }
}
