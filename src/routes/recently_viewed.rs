// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recently viewed recipes.

use crate::error::Result;
use crate::models::Recipe;
use crate::routes::extract::{AppJson, AppQuery};
use crate::AppState;
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/recently-viewed",
        get(list_recently_viewed).post(record_view),
    )
}

#[derive(Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

async fn list_recently_viewed(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<RecentQuery>,
) -> Json<Vec<Recipe>> {
    Json(state.recently_viewed.list(params.limit))
}

/// Record that a recipe was opened. Responds with the updated list.
async fn record_view(
    State(state): State<Arc<AppState>>,
    AppJson(recipe): AppJson<Recipe>,
) -> Result<Json<Vec<Recipe>>> {
    Ok(Json(state.recently_viewed.record(recipe)?))
}
