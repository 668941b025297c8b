//! Parameter types configuring the batch stages.

use crate::complete::CompletionParams;
use crate::fit::FitParams;
use crate::symmetry::SymmetryParams;
use serde::{Deserialize, Serialize};

/// Batch-wide parameters. The symmetry and completion stages can be switched
/// off independently; the fit stage always runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegularizerParams {
    pub fit: FitParams,
    pub symmetry: SymmetryParams,
    pub completion: CompletionParams,
    pub enable_symmetry: bool,
    pub enable_completion: bool,
}

impl Default for RegularizerParams {
    fn default() -> Self {
        Self {
            fit: FitParams::default(),
            symmetry: SymmetryParams::default(),
            completion: CompletionParams::default(),
            enable_symmetry: true,
            enable_completion: true,
        }
    }
}

impl RegularizerParams {
    /// Uses `threshold` for every residual and score gate. An explicit
    /// completion threshold is dropped so completion follows the fitter.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.fit.threshold = threshold;
        self.symmetry.threshold = threshold;
        self.completion.threshold = None;
        self.completion.fit.threshold = threshold;
        self
    }
}
