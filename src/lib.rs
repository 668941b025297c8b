#![doc = include_str!("../README.md")]

// Numerical core
pub mod complete;
pub mod fit;
pub mod symmetry;
pub mod types;

// Batch orchestration and reporting
pub mod diagnostics;
pub mod regularizer;

// Collaborators and tooling
pub mod angle;
pub mod config;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::complete::{complete, CompletionParams};
pub use crate::fit::{regularize, regularize_default, FitParams, RectangleResidual};
pub use crate::regularizer::{Regularizer, RegularizerParams};
pub use crate::symmetry::{detect_symmetry, SymmetryParams};
pub use crate::types::{Curve, Kind, Path, Point, RotationOrder, Shape, SymmetryResult};

pub use crate::diagnostics::{BatchReport, StageError};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use curve_regularizer::prelude::*;
///
/// let curve = regularize_default(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
/// assert_eq!(curve.kind(), Kind::Rectangle);
///
/// let sym = detect_symmetry(&curve, &SymmetryParams::default());
/// assert_eq!(sym.rotation, RotationOrder::Finite(4));
/// ```
pub mod prelude {
    pub use crate::{
        complete, detect_symmetry, regularize, regularize_default, CompletionParams, Curve,
        FitParams, Kind, Point, Regularizer, RegularizerParams, RotationOrder, Shape,
        SymmetryParams, SymmetryResult,
    };
}
