//! Stage runners over a batch of paths.
//!
//! Each runner validates its parameters up front and then maps the curve
//! operation over every path (in parallel with the `parallel` feature).
//! Output keeps the `[path][curve]` order of the input.

use crate::complete::{complete, CompletionParams};
use crate::diagnostics::{Stage, StageError};
use crate::fit::{regularize, FitParams};
use crate::symmetry::{try_detect_symmetry, SymmetryParams};
use crate::types::{Path, Point, SymmetryResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Classify every curve of every path.
pub fn run_fit_stage(
    input: &[Vec<Vec<Point>>],
    params: &FitParams,
) -> Result<Vec<Path>, StageError> {
    params
        .validate()
        .map_err(|reason| StageError::new(Stage::Fit, reason))?;
    Ok(map_paths(input, |curves| {
        curves
            .iter()
            .map(|points| regularize(points.as_slice(), params))
            .collect()
    }))
}

/// Symmetry per curve; `None` for curves the analyzer skips.
pub fn run_symmetry_stage(
    paths: &[Path],
    params: &SymmetryParams,
) -> Result<Vec<Vec<Option<SymmetryResult>>>, StageError> {
    params
        .validate()
        .map_err(|reason| StageError::new(Stage::Symmetry, reason))?;
    Ok(map_paths(paths, |path| {
        path.iter()
            .map(|curve| try_detect_symmetry(curve, params))
            .collect()
    }))
}

/// Completion per curve; non-Unknown curves are copied through.
pub fn run_completion_stage(
    paths: &[Path],
    params: &CompletionParams,
) -> Result<Vec<Path>, StageError> {
    params
        .validate()
        .map_err(|reason| StageError::new(Stage::Completion, reason))?;
    Ok(map_paths(paths, |path| {
        path.iter().map(|curve| complete(curve, params)).collect()
    }))
}

fn map_paths<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        items.par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items.iter().map(f).collect()
    }
}
