// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Shopping list model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Category for items copied from a recipe.
pub const CATEGORY_RECIPE: &str = "Recipe Ingredients";
/// Category for items typed in by hand.
pub const CATEGORY_CUSTOM: &str = "Custom";
/// `added_from` value for hand-typed items.
pub const SOURCE_MANUAL: &str = "Manual";

/// One line on the shopping list (stored under `shoppingList`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShoppingListItem {
    #[serde(deserialize_with = "super::id_from_string_or_number")]
    pub id: String,
    pub name: String,
    /// Free-form quantity ("2 cups"); empty for custom items
    #[serde(default)]
    pub quantity: String,
    pub category: String,
    #[serde(default)]
    pub checked: bool,
    /// Recipe title, or "Manual"
    pub added_from: String,
}

/// Checked/total counts for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShoppingProgress {
    pub checked: u32,
    pub total: u32,
    /// Rounded to the nearest whole percent; 0 for an empty list
    pub percent: u32,
}

impl ShoppingProgress {
    pub fn of(items: &[ShoppingListItem]) -> Self {
        let total = items.len() as u32;
        let checked = items.iter().filter(|i| i.checked).count() as u32;
        let percent = if total == 0 {
            0
        } else {
            ((checked as f64 / total as f64) * 100.0).round() as u32
        };
        Self {
            checked,
            total,
            percent,
        }
    }
}
