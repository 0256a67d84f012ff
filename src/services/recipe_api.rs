// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spoonacular API client.
//!
//! Handles:
//! - Recipe search (free text, filters, category)
//! - Random recipe
//! - Recipe information and nutrition lookups
//!
//! `SpoonacularClient` reports failures as `AppError::RecipeApi`.
//! `RecipeService` sits on top and turns every failure into an empty result,
//! so callers only ever see "no recipes" or "not available".

use crate::config::Config;
use crate::error::AppError;
use crate::models::recipe::{RandomResponse, SearchResponse};
use crate::models::{Category, Nutrition, Recipe, RecipeDetails, SearchFilters, SearchQuery};
use serde::de::DeserializeOwned;

/// Default page size for category browsing.
pub const DEFAULT_CATEGORY_LIMIT: u32 = 12;

/// Low-level Spoonacular client.
#[derive(Clone)]
pub struct SpoonacularClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    /// Create a client against `base_url` (e.g. `https://api.spoonacular.com`).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// `GET /recipes/complexSearch`.
    pub async fn complex_search(
        &self,
        query: Option<&str>,
        filters: &SearchFilters,
        category: Category,
        number: u32,
    ) -> Result<Vec<Recipe>, AppError> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        let params = search_params(query, filters, category, number);
        let response: SearchResponse = self.get_json(&url, &params).await?;
        tracing::debug!(
            returned = response.results.len(),
            total = response.total_results,
            "complexSearch response"
        );
        Ok(response.results)
    }

    /// `GET /recipes/random?number=1`.
    pub async fn random(&self) -> Result<Option<Recipe>, AppError> {
        let url = format!("{}/recipes/random", self.base_url);
        let response: RandomResponse = self
            .get_json(&url, &[("number", "1".to_string())])
            .await?;
        Ok(response.recipes.into_iter().next())
    }

    /// `GET /recipes/{id}/information`.
    pub async fn information(&self, recipe_id: u64) -> Result<RecipeDetails, AppError> {
        let url = format!("{}/recipes/{}/information", self.base_url, recipe_id);
        self.get_json(&url, &[]).await
    }

    /// `GET /recipes/{id}/nutritionWidget.json`.
    pub async fn nutrition_widget(&self, recipe_id: u64) -> Result<Nutrition, AppError> {
        let url = format!("{}/recipes/{}/nutritionWidget.json", self.base_url, recipe_id);
        self.get_json(&url, &[]).await
    }

    /// Generic GET with the API key attached and a JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::RecipeApi(e.without_url().to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 402 {
                tracing::warn!("Spoonacular daily quota exhausted (402)");
            }

            return Err(AppError::RecipeApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::RecipeApi(format!("JSON parse error: {}", e)))
    }
}

/// Query parameters for a search. Order is fixed so requests are reproducible.
///
/// Difficulty and cooking method have no Spoonacular counterpart and are not sent.
pub fn search_params(
    query: Option<&str>,
    filters: &SearchFilters,
    category: Category,
    number: u32,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(q) = query {
        params.push(("query", q.to_string()));
    }
    params.push(("number", number.to_string()));
    params.push(("addRecipeInformation", "true".to_string()));
    params.push(("fillIngredients", "true".to_string()));

    if let Some(diet) = &filters.diet {
        params.push(("diet", diet.clone()));
    }
    if let Some(cuisine) = &filters.cuisine {
        params.push(("cuisine", cuisine.clone()));
    }
    if let Some(minutes) = filters.max_ready_time {
        params.push(("maxReadyTime", minutes.to_string()));
    }
    if let Some(intolerances) = &filters.intolerances {
        params.push(("intolerances", intolerances.clone()));
    }
    if let Some(kind) = category.api_type() {
        params.push(("type", kind.to_string()));
    }
    params
}

// ─────────────────────────────────────────────────────────────────────────────
// RecipeService - failure-absorbing facade used by handlers and the controller
// ─────────────────────────────────────────────────────────────────────────────

/// High-level recipe lookups. Never returns an error: failures are logged and
/// mapped to an empty list or `None`.
#[derive(Clone)]
pub struct RecipeService {
    client: SpoonacularClient,
    result_count: u32,
}

impl RecipeService {
    pub fn new(client: SpoonacularClient, result_count: u32) -> Self {
        Self {
            client,
            result_count,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SpoonacularClient::new(&config.recipe_api_url, &config.recipe_api_key),
            config.search_result_count,
        )
    }

    /// Search with a combined query object.
    pub async fn search(&self, query: &SearchQuery) -> Vec<Recipe> {
        match self
            .client
            .complex_search(
                Some(query.query.as_str()),
                &query.filters,
                query.category,
                self.result_count,
            )
            .await
        {
            Ok(recipes) => {
                tracing::debug!(
                    query = %query.query,
                    category = %query.category,
                    filtered = !query.filters.is_empty(),
                    count = recipes.len(),
                    "Recipe search complete"
                );
                recipes
            }
            Err(e) => {
                tracing::error!(query = %query.query, error = %e, "Failed to fetch recipes");
                Vec::new()
            }
        }
    }

    /// Browse a category without a text query.
    pub async fn recipes_by_category(&self, category: Category, limit: u32) -> Vec<Recipe> {
        self.client
            .complex_search(None, &SearchFilters::default(), category, limit)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(%category, error = %e, "Failed to fetch recipes by category");
                Vec::new()
            })
    }

    pub async fn random_recipe(&self) -> Option<Recipe> {
        self.client.random().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to fetch random recipe");
            None
        })
    }

    pub async fn recipe_details(&self, recipe_id: u64) -> Option<RecipeDetails> {
        self.client
            .information(recipe_id)
            .await
            .map_err(|e| {
                tracing::error!(recipe_id, error = %e, "Failed to fetch recipe details");
            })
            .ok()
    }

    pub async fn nutrition(&self, recipe_id: u64) -> Option<Nutrition> {
        self.client
            .nutrition_widget(recipe_id)
            .await
            .map_err(|e| {
                tracing::error!(recipe_id, error = %e, "Failed to fetch nutrition");
            })
            .ok()
    }
}
