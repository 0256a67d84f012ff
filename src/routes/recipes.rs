// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe lookups against the external API.
//!
//! Upstream failures never surface as errors here: searches come back empty
//! and detail panels get a 404 "not available".

use crate::error::{AppError, Result};
use crate::models::filters::deserialize_minutes;
use crate::models::{Category, Nutrition, Recipe, RecipeDetails, SearchFilters, SearchQuery};
use crate::routes::extract::{AppPath, AppQuery};
use crate::routes::validate_payload;
use crate::services::recipe_api::DEFAULT_CATEGORY_LIMIT;
use crate::services::ShareLinks;
use crate::AppState;
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

const MAX_CATEGORY_LIMIT: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recipes/search", get(search_recipes))
        .route("/api/recipes/random", get(random_recipe))
        .route("/api/recipes/category/{category}", get(recipes_by_category))
        .route("/api/recipes/{id}", get(get_recipe))
        .route("/api/recipes/{id}/nutrition", get(get_nutrition))
        .route("/api/recipes/{id}/share", get(get_share_links))
}

// ─── Search ──────────────────────────────────────────────────

/// Flat query string: `?query=pasta&diet=vegan&maxReadyTime=30&category=dinner`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct RecipeSearchParams {
    #[serde(default)]
    #[validate(length(max = 200, message = "Must be at most 200 characters"))]
    query: String,
    diet: Option<String>,
    cuisine: Option<String>,
    #[serde(default, deserialize_with = "deserialize_minutes")]
    max_ready_time: Option<u32>,
    intolerances: Option<String>,
    difficulty: Option<String>,
    cooking_method: Option<String>,
    #[serde(default)]
    category: Category,
}

impl RecipeSearchParams {
    fn into_query(self) -> SearchQuery {
        SearchQuery {
            query: self.query.trim().to_string(),
            filters: SearchFilters {
                diet: self.diet,
                cuisine: self.cuisine,
                max_ready_time: self.max_ready_time,
                intolerances: self.intolerances,
                difficulty: self.difficulty,
                cooking_method: self.cooking_method,
            }
            .normalized(),
            category: self.category,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeListResponse {
    pub count: usize,
    pub results: Vec<Recipe>,
}

impl From<Vec<Recipe>> for RecipeListResponse {
    fn from(results: Vec<Recipe>) -> Self {
        Self {
            count: results.len(),
            results,
        }
    }
}

/// One-shot search, independent of the search controller.
async fn search_recipes(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<RecipeSearchParams>,
) -> Result<Json<RecipeListResponse>> {
    validate_payload(&params)?;
    let query = params.into_query();
    validate_payload(&query.filters)?;

    tracing::debug!(query = %query.query, category = %query.category, "Searching recipes");

    let results = state.recipes.search(&query).await;
    Ok(Json(results.into()))
}

#[derive(Deserialize)]
struct CategoryParams {
    limit: Option<u32>,
}

async fn recipes_by_category(
    State(state): State<Arc<AppState>>,
    AppPath(category): AppPath<String>,
    AppQuery(params): AppQuery<CategoryParams>,
) -> Result<Json<RecipeListResponse>> {
    let category: Category = category
        .parse()
        .map_err(|e: crate::models::filters::UnknownCategory| {
            AppError::BadRequest(e.to_string())
        })?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_CATEGORY_LIMIT)
        .clamp(1, MAX_CATEGORY_LIMIT);

    let results = state.recipes.recipes_by_category(category, limit).await;
    Ok(Json(results.into()))
}

async fn random_recipe(State(state): State<Arc<AppState>>) -> Result<Json<Recipe>> {
    state
        .recipes
        .random_recipe()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No random recipe available".to_string()))
}

// ─── Details ─────────────────────────────────────────────────

async fn get_recipe(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<RecipeDetails>> {
    state
        .recipes
        .recipe_details(id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Recipe {} details not available", id)))
}

async fn get_nutrition(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
) -> Result<Json<Nutrition>> {
    state
        .recipes
        .nutrition(id)
        .await
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound("Nutritional information not available".to_string())
        })
}

#[derive(Deserialize)]
struct ShareParams {
    title: Option<String>,
}

/// Share links. Without `?title=` the title is looked up upstream.
async fn get_share_links(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
    AppQuery(params): AppQuery<ShareParams>,
) -> Result<Json<ShareLinks>> {
    let title = match params.title.filter(|t| !t.trim().is_empty()) {
        Some(title) => title,
        None => state
            .recipes
            .recipe_details(id)
            .await
            .map(|details| details.recipe.title)
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not available", id)))?,
    };

    Ok(Json(ShareLinks::new(&state.config.frontend_url, id, &title)))
}
