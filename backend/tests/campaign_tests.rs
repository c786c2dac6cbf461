//! Campaign dispatch tests
//!
//! Covers the batch summary semantics: partial failures are counted, the
//! batch never aborts, and the totals always add up.

use proptest::prelude::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DispatchSummary {
    total: u32,
    succeeded: u32,
    failed: u32,
}

impl DispatchSummary {
    fn record(&mut self, success: bool) {
        self.total += 1;
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

fn settle(outcomes: &[bool]) -> DispatchSummary {
    let mut summary = DispatchSummary::default();
    for outcome in outcomes {
        summary.record(*outcome);
    }
    summary
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// All dispatches succeed
    #[test]
    fn test_all_success() {
        let summary = settle(&[true, true, true]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 3);
        assert_eq!(summary.failed, 0);
    }

    /// A failed dispatch is counted, not fatal
    #[test]
    fn test_partial_failure() {
        let summary = settle(&[true, false, true, false]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 2);
    }

    /// No customers means an empty summary
    #[test]
    fn test_empty_batch() {
        let summary = settle(&[]);
        assert_eq!(summary, DispatchSummary::default());
    }

    /// Message preview truncation at 50 characters
    #[test]
    fn test_preview_truncation() {
        let preview = |message: &str| -> String {
            let truncated: String = message.chars().take(50).collect();
            if message.chars().count() > 50 {
                format!("{}...", truncated)
            } else {
                truncated
            }
        };

        assert_eq!(preview("short"), "short");
        let long = "x".repeat(60);
        assert_eq!(preview(&long).chars().count(), 53);
        assert!(preview(&long).ends_with("..."));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Counts always reconcile: total = succeeded + failed
        #[test]
        fn prop_counts_reconcile(outcomes in prop::collection::vec(any::<bool>(), 0..100)) {
            let summary = settle(&outcomes);
            prop_assert_eq!(summary.total, summary.succeeded + summary.failed);
            prop_assert_eq!(summary.total as usize, outcomes.len());
        }

        /// Every dispatch is settled regardless of failures before it
        #[test]
        fn prop_failures_do_not_abort_batch(
            outcomes in prop::collection::vec(any::<bool>(), 1..100)
        ) {
            let summary = settle(&outcomes);
            let expected_failures = outcomes.iter().filter(|o| !**o).count() as u32;
            prop_assert_eq!(summary.failed, expected_failures);
            prop_assert_eq!(summary.total as usize, outcomes.len());
        }
    }
}
