//! Validation and normalization helpers

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Normalize a menu item display name for use in identifiers:
/// lowercase with spaces replaced by underscores.
pub fn normalize_menu_item_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Build the day-granular campaign dedup key for a menu item.
///
/// One key per menu item per calendar day, so a promotion recommended and
/// launched in the morning is not re-suggested in the afternoon.
pub fn campaign_started_id(menu_item_name: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}",
        normalize_menu_item_name(menu_item_name),
        date.format("%Y-%m-%d")
    )
}

/// Validate that an amount is strictly positive
pub fn validate_positive_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_spaces_and_case() {
        assert_eq!(normalize_menu_item_name("Ice Cream"), "ice_cream");
        assert_eq!(normalize_menu_item_name("Burger"), "burger");
    }

    #[test]
    fn campaign_key_is_day_granular() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 6).unwrap();
        assert_eq!(campaign_started_id("Ice Cream", date), "ice_cream_2025-04-06");
    }

    #[test]
    fn rejects_non_positive_amounts() {
        assert!(validate_positive_amount(Decimal::ZERO).is_err());
        assert!(validate_positive_amount(Decimal::from(-3)).is_err());
        assert!(validate_positive_amount(Decimal::ONE).is_ok());
    }
}
