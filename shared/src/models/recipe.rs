//! Recipe catalog models
//!
//! The catalog maps menu items to their ingredient lists. It is loaded once
//! from a static JSON resource at process start and never mutated afterwards.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of menu items the sales models predict for.
///
/// The serialized form matches the column names of the historical sales
/// dataset the forecasting models were trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuItemKey {
    #[serde(rename = "burger_sales")]
    Burger,
    #[serde(rename = "salad_sales")]
    Salad,
    #[serde(rename = "pizza_sales")]
    Pizza,
    #[serde(rename = "ice_cream_sales")]
    IceCream,
}

impl MenuItemKey {
    /// All keys in catalog iteration order
    pub const ALL: [MenuItemKey; 4] = [
        MenuItemKey::Burger,
        MenuItemKey::Salad,
        MenuItemKey::Pizza,
        MenuItemKey::IceCream,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuItemKey::Burger => "burger_sales",
            MenuItemKey::Salad => "salad_sales",
            MenuItemKey::Pizza => "pizza_sales",
            MenuItemKey::IceCream => "ice_cream_sales",
        }
    }

    /// Display name used when the catalog has no entry for this key
    pub fn fallback_name(&self) -> &'static str {
        match self {
            MenuItemKey::Burger => "Burger",
            MenuItemKey::Salad => "Salad",
            MenuItemKey::Pizza => "Pizza",
            MenuItemKey::IceCream => "Ice Cream",
        }
    }
}

/// One ingredient line of a recipe: amount needed per menu item sold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub item: String,
    pub amount: Decimal,
    pub unit: String,
}

/// A menu item's recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Errors detected while building a catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecipeError {
    #[error("recipe '{menu_item}' has non-positive amount for ingredient '{ingredient}'")]
    NonPositiveAmount {
        menu_item: String,
        ingredient: String,
    },
}

/// Immutable recipe catalog
///
/// Invariant: every ingredient amount is strictly positive, so the
/// producible-quantity division downstream can never divide by zero.
#[derive(Debug, Clone)]
pub struct RecipeCatalog {
    recipes: HashMap<MenuItemKey, Recipe>,
}

impl RecipeCatalog {
    /// Build a catalog, rejecting malformed recipes eagerly
    pub fn from_recipes(recipes: HashMap<MenuItemKey, Recipe>) -> Result<Self, RecipeError> {
        for (key, recipe) in &recipes {
            for ingredient in &recipe.ingredients {
                if ingredient.amount <= Decimal::ZERO {
                    return Err(RecipeError::NonPositiveAmount {
                        menu_item: key.as_str().to_string(),
                        ingredient: ingredient.item.clone(),
                    });
                }
            }
        }
        Ok(Self { recipes })
    }

    pub fn get(&self, key: MenuItemKey) -> Option<&Recipe> {
        self.recipes.get(&key)
    }

    /// Iterate recipes in the fixed `MenuItemKey::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (MenuItemKey, &Recipe)> {
        MenuItemKey::ALL
            .iter()
            .filter_map(|key| self.recipes.get(key).map(|recipe| (*key, recipe)))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
