// Utility functions and helpers
//
// This module provides progress reporting for long-running ingest runs.

pub mod progress_report;

pub use progress_report::{ProgressState, ProgressReportFn};
