//! Sales forecast models
//!
//! The forecast oracle produces one entry per future day with a predicted
//! sales quantity per menu item. Predictions are already rounded to whole
//! units and clamped at zero by the oracle.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MenuItemKey;

/// Predicted sales for one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySalesForecast {
    pub date: NaiveDate,
    pub quantities: HashMap<MenuItemKey, i64>,
}

impl DailySalesForecast {
    /// Predicted quantity for a menu item, zero when absent
    pub fn quantity(&self, key: MenuItemKey) -> i64 {
        self.quantities.get(&key).copied().unwrap_or(0)
    }
}

/// A multi-day sales forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesForecast {
    pub days: Vec<DailySalesForecast>,
}

impl SalesForecast {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
