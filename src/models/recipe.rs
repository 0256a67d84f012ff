// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recipe records as returned by the Spoonacular API.
//!
//! The API owns these shapes. We name the fields we read and keep everything
//! else in `extra`, so a stored snapshot round-trips without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recipe summary (search results, favorites, recently viewed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready_in_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    /// Fields we don't interpret (scores, source URLs, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    /// Minimal recipe, mostly useful for tests and fixtures.
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image: None,
            ready_in_minutes: None,
            servings: None,
            cuisines: Vec::new(),
            diets: Vec::new(),
            dish_types: Vec::new(),
            extra: Map::new(),
        }
    }
}

/// Full recipe from `/recipes/{id}/information`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    #[serde(default)]
    pub extended_ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub analyzed_instructions: Vec<InstructionBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// HTML summary, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Cents per serving
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_serving: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spoonacular_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wine_pairing: Option<WinePairing>,
    #[serde(flatten)]
    pub recipe: Recipe,
}

/// One entry of `extendedIngredients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    /// Original recipe line, e.g. "2 cups flour, sifted"
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    /// Quantity text as shown on the shopping list ("2 cups", "3").
    pub fn quantity(&self) -> String {
        format!("{} {}", self.amount, self.unit).trim().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub number: u32,
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub ingredients: Vec<StepIngredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepIngredient {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinePairing {
    #[serde(default)]
    pub paired_wines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing_text: Option<String>,
}

/// Response of `/recipes/{id}/nutritionWidget.json`.
///
/// Headline values are strings with units attached ("49g"), as the API sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub carbs: String,
    #[serde(default)]
    pub fat: String,
    #[serde(default)]
    pub protein: String,
    /// Nutrients to limit
    #[serde(default)]
    pub bad: Vec<Nutrient>,
    /// Nutrients to get enough of
    #[serde(default)]
    pub good: Vec<Nutrient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrient {
    pub title: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub percent_of_daily_needs: f64,
}

/// Search response envelope from `/recipes/complexSearch`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<Recipe>,
    /// Matches upstream, not just this page
    #[serde(default)]
    pub total_results: u32,
}

/// Response envelope from `/recipes/random`.
#[derive(Debug, Deserialize)]
pub(crate) struct RandomResponse {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}
