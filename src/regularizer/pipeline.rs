//! Batch pipeline driving the three stages end-to-end.
//!
//! ```no_run
//! use curve_regularizer::{Regularizer, RegularizerParams};
//!
//! # fn example(paths: Vec<Vec<Vec<[f64; 2]>>>) -> Result<(), Box<dyn std::error::Error>> {
//! let regularizer = Regularizer::new(RegularizerParams::default());
//! let report = regularizer.process(&paths)?;
//! println!("{} curves: {}", report.curve_count(), report.counts);
//! # Ok(())
//! # }
//! ```
use super::params::RegularizerParams;
use super::stages::{run_completion_stage, run_fit_stage, run_symmetry_stage};
use crate::diagnostics::{elapsed_ms, BatchReport, KindCounts, Stage, StageError, TimingBreakdown};
use crate::types::Point;
use log::{debug, warn};
use std::time::Instant;

/// Runs fitting, symmetry analysis and completion over a batch of paths.
#[derive(Clone, Debug, Default)]
pub struct Regularizer {
    params: RegularizerParams,
}

impl Regularizer {
    pub fn new(params: RegularizerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RegularizerParams {
        &self.params
    }

    /// Process `input` (`[path][curve][point]`).
    ///
    /// Fails only when the fit stage cannot run. Symmetry and completion
    /// failures are recorded in [`BatchReport::stage_errors`].
    pub fn process(&self, input: &[Vec<Vec<Point>>]) -> Result<BatchReport, StageError> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        debug!(
            "Regularizer::process start paths={} curves={}",
            input.len(),
            input.iter().map(Vec::len).sum::<usize>()
        );

        let start = Instant::now();
        let paths = run_fit_stage(input, &self.params.fit)?;
        timings.push(Stage::Fit.as_str(), elapsed_ms(start));
        let counts = KindCounts::from_paths(&paths);
        debug!("Regularizer::process fit {counts}");

        let mut stage_errors = Vec::new();

        let symmetry = if self.params.enable_symmetry {
            let start = Instant::now();
            let result = run_symmetry_stage(&paths, &self.params.symmetry);
            timings.push(Stage::Symmetry.as_str(), elapsed_ms(start));
            record(result, &mut stage_errors)
        } else {
            None
        };

        let completed = if self.params.enable_completion {
            let start = Instant::now();
            let result = run_completion_stage(&paths, &self.params.completion);
            timings.push(Stage::Completion.as_str(), elapsed_ms(start));
            record(result, &mut stage_errors)
        } else {
            None
        };
        let completion_counts = completed.as_deref().map(KindCounts::from_paths);

        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "Regularizer::process done total_ms={:.3} errors={}",
            timings.total_ms,
            stage_errors.len()
        );

        Ok(BatchReport {
            paths,
            symmetry,
            completed,
            stage_errors,
            counts,
            completion_counts,
            timings,
        })
    }
}

fn record<T>(result: Result<T, StageError>, errors: &mut Vec<StageError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{err}");
            errors.push(err);
            None
        }
    }
}
