//! Search options.

use std::time::Duration;

/// Per-query knobs for the route search.
///
/// `Default` means unbounded: no cost ceiling and no wall-clock budget.
/// The server layer fills in its configured defaults before searching.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOptions {
    /// Reject any route whose total travel seconds exceed this.
    pub max_cost_secs: Option<f64>,

    /// Abort the search after this much wall-clock time.
    pub timeout: Option<Duration>,
}

impl SearchOptions {
    pub fn with_max_cost(mut self, secs: f64) -> Self {
        self.max_cost_secs = Some(secs);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
