use serde::{Deserialize, Serialize};

/// Parameters of the symmetry analyzer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymmetryParams {
    /// Mean nearest-neighbour distance below which a candidate symmetry is
    /// accepted (length units).
    pub threshold: f64,
    /// Number of candidate mirror-axis angles, evenly spaced over [0, π).
    pub reflection_angles: usize,
    /// Highest rotation order tried by the search (orders 2..=max).
    pub max_rotation_order: u32,
    /// Unknown curves with fewer samples are skipped by the batch stage.
    pub min_points: usize,
    /// Relative tolerance when comparing semi-axes or side lengths.
    pub axis_rtol: f64,
    /// Absolute tolerance when comparing semi-axes or side lengths.
    pub axis_atol: f64,
}

impl Default for SymmetryParams {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            reflection_angles: 180,
            max_rotation_order: 8,
            min_points: 2,
            axis_rtol: 1e-5,
            axis_atol: 1e-8,
        }
    }
}

impl SymmetryParams {
    /// `|a − b| ≤ atol + rtol·|b|`
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.axis_atol + self.axis_rtol * b.abs()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(format!("threshold must be positive, got {}", self.threshold));
        }
        if self.reflection_angles == 0 {
            return Err("reflection_angles must be at least 1".to_string());
        }
        if self.max_rotation_order < 2 {
            return Err(format!(
                "max_rotation_order must be at least 2, got {}",
                self.max_rotation_order
            ));
        }
        Ok(())
    }
}
