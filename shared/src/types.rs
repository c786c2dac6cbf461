//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Outcome of a batch of outbound message dispatches.
///
/// Partial failures never abort a batch; the counts report what happened
/// after every dispatch settled.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,
}

impl DispatchSummary {
    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self) {
        self.total += 1;
        self.failed += 1;
    }
}
