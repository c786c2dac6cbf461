//! Inventory-forecast reconciliation tests
//!
//! Covers the classification rules:
//! - difference < 0 is a shortage
//! - difference > threshold is an excess (strict)
//! - everything else is neutral

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Units above the required amount before stock counts as surplus
const EXCESS_THRESHOLD: i64 = 20;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classification {
    Shortage,
    Excess,
    Neutral,
}

fn classify(current: Decimal, required: Decimal) -> Classification {
    let difference = current - required;
    if difference < Decimal::ZERO {
        Classification::Shortage
    } else if difference > Decimal::from(EXCESS_THRESHOLD) {
        Classification::Excess
    } else {
        Classification::Neutral
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test requirement accumulation across forecast days
    #[test]
    fn test_requirement_accumulation() {
        // 10 burgers/day for 3 days at 1 kg beef per burger
        let per_unit = dec("1");
        let mut total = Decimal::ZERO;
        for _ in 0..3 {
            total += per_unit * Decimal::from(10);
        }

        assert_eq!(total, dec("30"));
    }

    /// Test effective inventory includes outstanding orders
    #[test]
    fn test_effective_inventory() {
        let on_hand = dec("10");
        let ordered = dec("20");

        assert_eq!(on_hand + ordered, dec("30"));
    }

    /// Test shortage classification
    #[test]
    fn test_shortage_when_stock_below_requirement() {
        assert_eq!(classify(dec("10"), dec("30")), Classification::Shortage);
    }

    /// Test neutral band
    #[test]
    fn test_neutral_when_difference_small() {
        assert_eq!(classify(dec("30"), dec("30")), Classification::Neutral);
        assert_eq!(classify(dec("45"), dec("30")), Classification::Neutral);
    }

    /// Difference exactly at the threshold stays neutral (strict >)
    #[test]
    fn test_threshold_boundary_is_neutral() {
        let required = dec("30");
        let current = required + Decimal::from(EXCESS_THRESHOLD);

        assert_eq!(classify(current, required), Classification::Neutral);
        assert_eq!(
            classify(current + dec("0.001"), required),
            Classification::Excess
        );
    }

    /// Spec scenario: 10 burgers/day x 3 days, beef 50 in stock
    #[test]
    fn test_burger_scenario() {
        let required = dec("1") * Decimal::from(10) * Decimal::from(3);
        assert_eq!(required, dec("30"));

        // 50 - 30 = 20: exactly at threshold, neutral
        assert_eq!(classify(dec("50"), required), Classification::Neutral);

        // salad forecast is zero, so lettuce never becomes a requirement
        let lettuce_required = dec("1") * Decimal::from(0) * Decimal::from(3);
        assert_eq!(lettuce_required, Decimal::ZERO);
    }

    /// Shortages sort ascending by difference (worst first)
    #[test]
    fn test_shortage_ordering() {
        let mut differences = vec![dec("-5"), dec("-30"), dec("-12")];
        differences.sort();

        assert_eq!(differences, vec![dec("-30"), dec("-12"), dec("-5")]);
    }

    /// Excesses sort descending by difference (largest surplus first)
    #[test]
    fn test_excess_ordering() {
        let mut differences = vec![dec("25"), dec("80"), dec("42")];
        differences.sort_by(|a, b| b.cmp(a));

        assert_eq!(differences, vec![dec("80"), dec("42"), dec("25")]);
    }

    /// Missing inventory counts as zero stock
    #[test]
    fn test_missing_inventory_is_zero() {
        let current = Decimal::ZERO;
        let required = dec("15");

        assert_eq!(classify(current, required), Classification::Shortage);
        assert_eq!(current - required, dec("-15"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for non-negative stock amounts
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100_000i64).prop_map(|n| Decimal::new(n, 1)) // 0.0 to 10000.0
    }

    /// Strategy for positive requirements
    fn requirement_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=100_000i64).prop_map(|n| Decimal::new(n, 1))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every classification is exactly one of the three outcomes
        #[test]
        fn prop_classification_is_total(
            current in amount_strategy(),
            required in requirement_strategy()
        ) {
            let difference = current - required;
            let classification = classify(current, required);

            match classification {
                Classification::Shortage => prop_assert!(difference < Decimal::ZERO),
                Classification::Excess => prop_assert!(difference > Decimal::from(EXCESS_THRESHOLD)),
                Classification::Neutral => {
                    prop_assert!(difference >= Decimal::ZERO);
                    prop_assert!(difference <= Decimal::from(EXCESS_THRESHOLD));
                }
            }
        }

        /// With empty inventory, every positive requirement is a shortage
        #[test]
        fn prop_empty_inventory_all_shortages(required in requirement_strategy()) {
            prop_assert_eq!(
                classify(Decimal::ZERO, required),
                Classification::Shortage
            );
        }

        /// Inventory exactly equal to requirements is always neutral
        #[test]
        fn prop_exact_match_is_neutral(required in requirement_strategy()) {
            prop_assert_eq!(classify(required, required), Classification::Neutral);
        }

        /// Outstanding orders can only improve the classification
        #[test]
        fn prop_orders_never_worsen_classification(
            on_hand in amount_strategy(),
            ordered in amount_strategy(),
            required in requirement_strategy()
        ) {
            let without = classify(on_hand, required);
            let with = classify(on_hand + ordered, required);

            // Shortage can become neutral/excess but never the reverse
            if without != Classification::Shortage {
                prop_assert!(with != Classification::Shortage);
            }
        }

        /// Requirement totals are additive over days
        #[test]
        fn prop_requirements_additive(
            daily in prop::collection::vec(1i64..=500, 1..10),
            per_unit in (1i64..=100).prop_map(|n| Decimal::new(n, 2))
        ) {
            let total: Decimal = daily
                .iter()
                .map(|qty| per_unit * Decimal::from(*qty))
                .sum();
            let expected = per_unit * Decimal::from(daily.iter().sum::<i64>());

            prop_assert_eq!(total, expected);
        }

        /// Sorting shortages ascending puts the worst shortage first
        #[test]
        fn prop_worst_shortage_first(
            mut differences in prop::collection::vec((-10_000i64..0).prop_map(Decimal::from), 1..20)
        ) {
            differences.sort();
            for pair in differences.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
            let min = differences.iter().min().unwrap();
            prop_assert_eq!(&differences[0], min);
        }
    }
}
