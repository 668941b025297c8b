//! Diagnostics data model returned by the batch pipeline.
//!
//! [`BatchReport`] bundles the per-stage outputs together with kind counts,
//! stage failures and a [`TimingBreakdown`].

pub mod report;
pub mod timing;

pub use report::{BatchReport, KindCounts, Stage, StageError};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
