// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shopping list.

use crate::error::{AppError, Result};
use crate::models::{RecipeDetails, ShoppingListItem, ShoppingProgress};
use crate::routes::extract::{AppJson, AppPath};
use crate::routes::validate_payload;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/shopping-list",
            get(get_shopping_list).delete(clear_all),
        )
        .route("/api/shopping-list/items", post(add_custom_item))
        .route("/api/shopping-list/items/{id}", delete(remove_item))
        .route("/api/shopping-list/items/{id}/toggle", post(toggle_item))
        .route("/api/shopping-list/recipe", post(add_recipe_ingredients))
        .route("/api/shopping-list/clear-completed", post(clear_completed))
        .route("/api/shopping-list/export", get(export_list))
}

#[derive(Serialize)]
pub struct ShoppingListResponse {
    pub items: Vec<ShoppingListItem>,
    pub progress: ShoppingProgress,
}

async fn get_shopping_list(State(state): State<Arc<AppState>>) -> Json<ShoppingListResponse> {
    let items = state.shopping_list.list();
    Json(ShoppingListResponse {
        progress: ShoppingProgress::of(&items),
        items,
    })
}

#[derive(Debug, Deserialize, Validate)]
struct NewItemRequest {
    #[validate(length(min = 1, max = 200, message = "Must be 1-200 characters"))]
    name: String,
}

async fn add_custom_item(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<NewItemRequest>,
) -> Result<(StatusCode, Json<ShoppingListItem>)> {
    validate_payload(&payload)?;
    let item = state.shopping_list.add_custom(&payload.name)?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Add every ingredient of a recipe the client already loaded.
async fn add_recipe_ingredients(
    State(state): State<Arc<AppState>>,
    AppJson(recipe): AppJson<RecipeDetails>,
) -> Result<(StatusCode, Json<Vec<ShoppingListItem>>)> {
    if recipe.extended_ingredients.is_empty() {
        return Err(AppError::BadRequest(
            "Recipe has no ingredients to add".to_string(),
        ));
    }
    let added = state.shopping_list.add_recipe_ingredients(&recipe)?;
    Ok((StatusCode::CREATED, Json(added)))
}

async fn toggle_item(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ShoppingListItem>> {
    state
        .shopping_list
        .toggle(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Shopping list item {}", id)))
}

async fn remove_item(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<String>,
) -> Result<StatusCode> {
    if state.shopping_list.remove(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Shopping list item {}", id)))
    }
}

#[derive(Serialize)]
pub struct ClearCompletedResponse {
    pub removed: usize,
    pub items: Vec<ShoppingListItem>,
}

async fn clear_completed(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearCompletedResponse>> {
    let removed = state.shopping_list.clear_completed()?;
    Ok(Json(ClearCompletedResponse {
        removed,
        items: state.shopping_list.list(),
    }))
}

async fn clear_all(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    state.shopping_list.clear_all()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Unchecked items as a downloadable `shopping-list.txt`.
async fn export_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping-list.txt\"",
            ),
        ],
        state.shopping_list.export_text(),
    )
}
