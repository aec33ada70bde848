//! Progress reporting for long-running operations.
//!
//! An ingest run calls [`ProgressState::report`] after every line. The
//! reporter callback is invoked at regular intervals and may cancel the run by
//! returning `true`.
//!
//! # Examples
//!
//! ```
//! use cedict_ingest::utils::progress_report::{ProgressState, ProgressReportFn};
//!
//! fn my_reporter(state: &mut ProgressState) -> bool {
//!     println!("{}: {}/{}", state.state_id, state.current, state.total);
//!     false // Return true to cancel the operation
//! }
//!
//! let mut progress = ProgressState::new("ingest", 100, 10, Some(my_reporter));
//! for i in 0..100 {
//!     if progress.report(i) {
//!         // Operation was cancelled
//!         break;
//!     }
//! }
//! ```

/// Items between reports when the total is unknown.
pub const UNKNOWN_TOTAL_REPORT_INTERVAL: u64 = 10_000;

/// Function type for progress reporting callbacks.
///
/// The function receives a mutable reference to the progress state and
/// returns `true` to cancel the operation, or `false` to continue.
pub type ProgressReportFn = fn(&mut ProgressState) -> bool;

/// State information for progress reporting.
pub struct ProgressState {
    /// Identifier for this progress state (e.g., "ingest")
    pub state_id: String,
    /// Total amount of work, 0 when unknown
    pub total: u64,
    /// Amount of work done at the last report
    pub current: u64,
    /// Amount of work done at the previous report
    pub last: u64,
    /// Work between two reports
    pub report_interval: u64,
    pub reporter: Option<ProgressReportFn>,
}

impl ProgressState {
    /// Creates a new progress state.
    ///
    /// # Arguments
    ///
    /// * `state_id` - Identifier for this progress state
    /// * `total` - Total amount of work, or 0 when unknown
    /// * `report_interval_percent` - Percentage of `total` between reports (1-100)
    /// * `reporter` - Optional reporter function
    pub fn new(state_id: &str, total: u64, report_interval_percent: u64, reporter: Option<ProgressReportFn>) -> Self {
        let report_interval = if total == 0 {
            UNKNOWN_TOTAL_REPORT_INTERVAL
        } else {
            (total * report_interval_percent.clamp(1, 100) / 100).max(1)
        };
        Self {
            state_id: state_id.to_string(),
            total,
            current: 0,
            last: 0,
            report_interval,
            reporter,
        }
    }

    /// Reports progress.
    ///
    /// Calls the reporter when at least one interval has passed since the last
    /// report, or when `current` reaches the total.
    ///
    /// # Returns
    ///
    /// Returns `true` if the operation should be cancelled, `false` otherwise.
    pub fn report(&mut self, current: u64) -> bool {
        let Some(reporter) = self.reporter else {
            return false;
        };
        let finished = self.total > 0 && current >= self.total;
        if current.saturating_sub(self.last) >= self.report_interval || (finished && current != self.last) {
            self.current = current;
            let cancelled = reporter(self);
            self.last = current;
            cancelled
        } else {
            false
        }
    }
}
