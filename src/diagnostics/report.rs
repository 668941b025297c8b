use super::TimingBreakdown;
use crate::types::{Kind, Path, SymmetryResult};
use serde::Serialize;
use std::fmt;

/// Batch stage identifier used in timings and failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fit,
    Symmetry,
    Completion,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Fit => "fit",
            Stage::Symmetry => "symmetry",
            Stage::Completion => "completion",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a whole batch stage. Curve-level problems never surface here;
/// they only turn a curve into `Unknown`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageError {
    pub stage: Stage,
    pub reason: String,
}

impl StageError {
    pub fn new(stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stage failed: {}", self.stage, self.reason)
    }
}

impl std::error::Error for StageError {}

/// Number of curves per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindCounts {
    pub line: usize,
    pub circle: usize,
    pub ellipse: usize,
    pub rectangle: usize,
    pub unknown: usize,
    pub completed: usize,
}

impl KindCounts {
    pub fn from_paths(paths: &[Path]) -> Self {
        let mut counts = Self::default();
        for curve in paths.iter().flatten() {
            counts.add(curve.kind());
        }
        counts
    }

    pub fn add(&mut self, kind: Kind) {
        *self.slot(kind) += 1;
    }

    pub fn get(&self, kind: Kind) -> usize {
        match kind {
            Kind::Line => self.line,
            Kind::Circle => self.circle,
            Kind::Ellipse => self.ellipse,
            Kind::Rectangle => self.rectangle,
            Kind::Unknown => self.unknown,
            Kind::Completed => self.completed,
        }
    }

    pub fn total(&self) -> usize {
        Kind::ALL.iter().map(|&k| self.get(k)).sum()
    }

    fn slot(&mut self, kind: Kind) -> &mut usize {
        match kind {
            Kind::Line => &mut self.line,
            Kind::Circle => &mut self.circle,
            Kind::Ellipse => &mut self.ellipse,
            Kind::Rectangle => &mut self.rectangle,
            Kind::Unknown => &mut self.unknown,
            Kind::Completed => &mut self.completed,
        }
    }
}

impl fmt::Display for KindCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in Kind::ALL {
            let n = self.get(kind);
            if n == 0 {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{kind}={n}")?;
            first = false;
        }
        if first {
            f.write_str("-")?;
        }
        Ok(())
    }
}

/// Result of [`Regularizer::process`](crate::Regularizer::process).
///
/// `symmetry` and `completed` mirror the `[path][curve]` layout of `paths`.
/// A stage that was disabled or failed leaves its output `None`; failures are
/// listed in `stage_errors`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub paths: Vec<Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symmetry: Option<Vec<Vec<Option<SymmetryResult>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<Vec<Path>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stage_errors: Vec<StageError>,
    pub counts: KindCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_counts: Option<KindCounts>,
    pub timings: TimingBreakdown,
}

impl BatchReport {
    pub fn curve_count(&self) -> usize {
        self.paths.iter().map(Vec::len).sum()
    }

    /// Curves with a reflection axis or a rotation order above one.
    pub fn symmetric_count(&self) -> Option<usize> {
        self.symmetry.as_ref().map(|paths| {
            paths
                .iter()
                .flatten()
                .flatten()
                .filter(|s| s.has_reflection || s.rotation.is_symmetric())
                .count()
        })
    }

    pub fn stage_error(&self, stage: Stage) -> Option<&StageError> {
        self.stage_errors.iter().find(|e| e.stage == stage)
    }
}
