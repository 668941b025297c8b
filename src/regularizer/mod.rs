//! Batch orchestration: fit → symmetry → completion.
//!
//! [`Regularizer`] runs the fitter over every curve first. Symmetry and
//! completion both consume the fitter's output and are independent of each
//! other: if one of them fails (invalid parameters) its output is `None` in
//! the report, the failure is recorded, and the other stage still runs.

pub mod params;
mod pipeline;
pub mod stages;

pub use params::RegularizerParams;
pub use pipeline::Regularizer;
pub use stages::{run_completion_stage, run_fit_stage, run_symmetry_stage};
