use crate::fit::FitParams;
use serde::{Deserialize, Serialize};

/// Parameters of the completion engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionParams {
    /// Residual gate for the circle and ellipse reconstructions. `None` uses
    /// `fit.threshold`.
    pub threshold: Option<f64>,
    /// Number of reconstructed samples.
    pub sample_count: usize,
    /// Fitter settings reused by the reconstruction (iteration cap and the
    /// default threshold).
    pub fit: FitParams,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            threshold: None,
            sample_count: 100,
            fit: FitParams::default(),
        }
    }
}

impl CompletionParams {
    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or(self.fit.threshold)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let threshold = self.effective_threshold();
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(format!("threshold must be positive, got {threshold}"));
        }
        if self.sample_count < 2 {
            return Err(format!(
                "sample_count must be at least 2, got {}",
                self.sample_count
            ));
        }
        self.fit.validate()
    }
}
