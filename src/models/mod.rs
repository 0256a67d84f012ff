// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod filters;
pub mod recipe;
pub mod review;
pub mod shopping;

pub use filters::{Category, SearchFilters, SearchQuery};
pub use recipe::{Ingredient, Nutrition, Recipe, RecipeDetails};
pub use review::{Review, ReviewSummary};
pub use shopping::{ShoppingListItem, ShoppingProgress};

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredId {
    Text(String),
    Number(serde_json::Number),
}

/// Item ids are strings, but lists saved by the browser build carry
/// `Date.now()` numbers (sometimes with a random fraction). Both decode to text.
pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StoredId::deserialize(deserializer)? {
        StoredId::Text(s) => s,
        StoredId::Number(n) => n.to_string(),
    })
}
