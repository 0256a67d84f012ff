// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite recipes.

use crate::error::{AppError, Result};
use crate::models::Recipe;
use crate::routes::extract::{AppJson, AppPath};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/favorites", get(list_favorites).delete(clear_favorites))
        .route("/api/favorites/toggle", post(toggle_favorite))
        .route(
            "/api/favorites/{id}",
            get(get_favorite_status).delete(remove_favorite),
        )
}

#[derive(Serialize)]
pub struct FavoriteStatus {
    pub id: u64,
    pub favorite: bool,
    /// Size of the favorites collection after the operation
    pub count: usize,
}

async fn list_favorites(State(state): State<Arc<AppState>>) -> Json<Vec<Recipe>> {
    Json(state.favorites.list())
}

/// Toggle a recipe snapshot in or out of favorites.
async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    AppJson(recipe): AppJson<Recipe>,
) -> Result<Json<FavoriteStatus>> {
    let id = recipe.id;
    let favorite = state.favorites.toggle(recipe)?;
    Ok(Json(FavoriteStatus {
        id,
        favorite,
        count: state.favorites.list().len(),
    }))
}

async fn get_favorite_status(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
) -> Json<FavoriteStatus> {
    Json(FavoriteStatus {
        id,
        favorite: state.favorites.is_favorite(id),
        count: state.favorites.list().len(),
    })
}

async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
) -> Result<StatusCode> {
    if state.favorites.remove(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Recipe {} is not a favorite", id)))
    }
}

async fn clear_favorites(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    state.favorites.clear()?;
    Ok(StatusCode::NO_CONTENT)
}
