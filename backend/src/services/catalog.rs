//! Recipe catalog loading
//!
//! The catalog is read once at process start and injected into the
//! aggregation and recommendation code paths. When loading fails the
//! server still starts, but every computation that needs recipes answers
//! with a configuration error instead of silently working from nothing.

use std::collections::HashMap;
use std::path::Path;

use shared::models::{MenuItemKey, Recipe, RecipeCatalog};

use crate::error::{AppError, AppResult};

/// Load the recipe catalog from a JSON file
pub fn load_recipe_catalog(path: impl AsRef<Path>) -> AppResult<RecipeCatalog> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Configuration(format!("Could not read recipes from {}: {}", path.display(), e))
    })?;

    parse_recipe_catalog(&raw)
}

/// Parse and validate recipe catalog JSON
pub fn parse_recipe_catalog(raw: &str) -> AppResult<RecipeCatalog> {
    let recipes: HashMap<MenuItemKey, Recipe> = serde_json::from_str(raw)
        .map_err(|e| AppError::Configuration(format!("Malformed recipes data: {}", e)))?;

    if recipes.is_empty() {
        return Err(AppError::Configuration(
            "Recipes data contains no recipes".to_string(),
        ));
    }

    RecipeCatalog::from_recipes(recipes)
        .map_err(|e| AppError::Configuration(format!("Invalid recipe: {}", e)))
}
