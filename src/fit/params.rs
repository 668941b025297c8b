//! Parameters shared by the primitive fits.

use serde::{Deserialize, Serialize};

/// How the rectangle fit scores a point against the fitted rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectangleResidual {
    /// Signed excess beyond the half-extents. Points inside the minimum-area
    /// rectangle never exceed zero.
    #[default]
    SignedExcess,
    /// Unsigned distance to the rectangle boundary, so interior points count
    /// against the match.
    Boundary,
}

/// Thresholds and iteration budgets for [`regularize`](super::regularize).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Maximum per-point residual accepted for any primitive (length units).
    pub threshold: f64,
    /// Iteration cap for the Levenberg–Marquardt circle fit.
    pub circle_max_iters: usize,
    /// Circle and ellipse matches need every angular step between
    /// consecutive samples to stay below this (degrees). At 90° the corners
    /// of a rectangle, which all lie on one circle, fall through to the
    /// rectangle fit.
    pub max_arc_gap_deg: f64,
    pub rectangle_residual: RectangleResidual,
}

// Slack on the arc-gap comparison so evenly spaced samples at exactly the
// limit are rejected regardless of atan2 rounding.
const ARC_GAP_EPS: f64 = 1e-9;

impl Default for FitParams {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            circle_max_iters: 100,
            max_arc_gap_deg: 90.0,
            rectangle_residual: RectangleResidual::default(),
        }
    }
}

impl FitParams {
    /// Largest accepted arc gap in radians, exclusive.
    pub fn max_arc_gap_rad(&self) -> f64 {
        self.max_arc_gap_deg.to_radians() - ARC_GAP_EPS
    }

    /// Same budgets with a different residual threshold.
    pub fn with_threshold(&self, threshold: f64) -> Self {
        Self {
            threshold,
            ..self.clone()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(format!("threshold must be positive, got {}", self.threshold));
        }
        if self.circle_max_iters == 0 {
            return Err("circle_max_iters must be at least 1".to_string());
        }
        if !(self.max_arc_gap_deg > 0.0 && self.max_arc_gap_deg <= 180.0) {
            return Err(format!(
                "max_arc_gap_deg must be in (0, 180], got {}",
                self.max_arc_gap_deg
            ));
        }
        Ok(())
    }
}
