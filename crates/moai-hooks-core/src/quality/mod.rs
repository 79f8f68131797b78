//! Quality gate thresholds and diagnostics-regression tracking.
//!
//! [`QualityGate`] converts a [`crate::diagnostics::SeverityCounts`] run
//! into a block/allow verdict against project policy; [`RegressionTracker`]
//! persists the baseline that verdict is measured against across sessions.

pub mod coverage;
pub mod gate;
pub mod regression;

pub use coverage::CoverageSnapshot;
pub use gate::{QualityGate, QualityThresholds};
pub use regression::{Baseline, RegressionReport, RegressionTracker};
