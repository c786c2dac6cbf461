//! Sales forecast tests
//!
//! Covers the regression shape applied to daily weather: linear in
//! temperature, weekend boost, rounded and clamped predictions.

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn predict(
    base: Decimal,
    temp_coefficient: Decimal,
    reference_temp: Decimal,
    weekend_boost: Decimal,
    date: NaiveDate,
    temp_max: Decimal,
) -> i64 {
    let mut quantity = base + temp_coefficient * (temp_max - reference_temp);
    if is_weekend(date) {
        quantity += weekend_boost;
    }
    quantity.round().to_i64().unwrap_or(0).max(0)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test weekday detection
    #[test]
    fn test_weekend_detection() {
        // 2025-04-05 is a Saturday, 2025-04-07 a Monday
        assert!(is_weekend(NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()));
        assert!(is_weekend(NaiveDate::from_ymd_opt(2025, 4, 6).unwrap()));
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()));
    }

    /// At the reference temperature the prediction equals the base
    #[test]
    fn test_base_prediction() {
        let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let quantity = predict(dec("38"), dec("0.4"), dec("18"), dec("12"), monday, dec("18"));
        assert_eq!(quantity, 38);
    }

    /// Warm weather raises demand for positive coefficients
    #[test]
    fn test_temperature_effect() {
        let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        // 12 + 2.1 * (30 - 20) = 33
        let quantity = predict(dec("12"), dec("2.1"), dec("20"), dec("8"), monday, dec("30"));
        assert_eq!(quantity, 33);
    }

    /// Negative coefficients lower demand in warm weather
    #[test]
    fn test_negative_coefficient() {
        let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        // 45 - 0.3 * (28 - 18) = 42
        let quantity = predict(dec("45"), dec("-0.3"), dec("18"), dec("15"), monday, dec("28"));
        assert_eq!(quantity, 42);
    }

    /// The weekend boost only applies on weekends
    #[test]
    fn test_weekend_boost() {
        let saturday = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();

        let weekend = predict(dec("38"), dec("0.4"), dec("18"), dec("12"), saturday, dec("18"));
        let weekday = predict(dec("38"), dec("0.4"), dec("18"), dec("12"), monday, dec("18"));

        assert_eq!(weekend - weekday, 12);
    }

    /// Predictions round to whole units
    #[test]
    fn test_rounding() {
        let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        // 38 + 0.4 * 1.6 = 38.64 -> 39
        let quantity = predict(dec("38"), dec("0.4"), dec("18"), dec("12"), monday, dec("19.6"));
        assert_eq!(quantity, 39);
    }

    /// A cold snap can never push a prediction below zero
    #[test]
    fn test_clamped_at_zero() {
        let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let quantity = predict(dec("12"), dec("2.1"), dec("20"), dec("8"), monday, dec("-15"));
        assert_eq!(quantity, 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for plausible daily max temperatures (-20.0 to 45.0 C)
    fn temp_strategy() -> impl Strategy<Value = Decimal> {
        (-200i64..=450i64).prop_map(|n| Decimal::new(n, 1))
    }

    /// Strategy for dates across a full year
    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0u64..365).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Days::new(offset)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Predictions are always non-negative whole units
        #[test]
        fn prop_predictions_non_negative(
            date in date_strategy(),
            temp in temp_strategy()
        ) {
            let quantity = predict(dec("12"), dec("2.1"), dec("20"), dec("8"), date, temp);
            prop_assert!(quantity >= 0);
        }

        /// For positive coefficients, warmer never predicts less
        #[test]
        fn prop_monotone_in_temperature(
            date in date_strategy(),
            temp in temp_strategy(),
            bump in (1i64..=100).prop_map(|n| Decimal::new(n, 1))
        ) {
            let cold = predict(dec("12"), dec("2.1"), dec("20"), dec("8"), date, temp);
            let warm = predict(dec("12"), dec("2.1"), dec("20"), dec("8"), date, temp + bump);
            prop_assert!(warm >= cold);
        }

        /// The weekend boost never lowers a prediction
        #[test]
        fn prop_weekend_boost_non_negative_effect(temp in temp_strategy()) {
            // 2025-04-05/07: Saturday and Monday with identical weather
            let saturday = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
            let monday = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();

            let weekend = predict(dec("38"), dec("0.4"), dec("18"), dec("12"), saturday, temp);
            let weekday = predict(dec("38"), dec("0.4"), dec("18"), dec("12"), monday, temp);

            prop_assert!(weekend >= weekday);
        }
    }
}
