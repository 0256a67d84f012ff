// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Search controller endpoints.
//!
//! The frontend forwards every keystroke to `PUT /api/search/query`; the
//! controller debounces them. Filter and category changes take effect at once.
//! Results are read back from `GET /api/search` or streamed from
//! `GET /api/search/events`.

use crate::error::{AppError, Result};
use crate::models::{Category, SearchFilters};
use crate::routes::extract::AppJson;
use crate::routes::validate_payload;
use crate::services::SearchSnapshot;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post, put},
    Json, Router,
};
use futures_util::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/search", get(get_search_state))
        .route("/api/search/query", put(set_query))
        .route("/api/search/submit", post(submit_query))
        .route(
            "/api/search/filters",
            put(set_filters).delete(clear_filters),
        )
        .route("/api/search/category", put(set_category))
        .route("/api/search/events", get(search_events))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStateResponse {
    #[serde(flatten)]
    pub snapshot: SearchSnapshot,
    /// Typed text still waiting out the debounce
    pub pending_query: Option<String>,
}

fn current_state(state: &AppState) -> Json<SearchStateResponse> {
    Json(SearchStateResponse {
        snapshot: state.search.snapshot(),
        pending_query: state.search.pending_text(),
    })
}

async fn get_search_state(State(state): State<Arc<AppState>>) -> Json<SearchStateResponse> {
    current_state(&state)
}

#[derive(Debug, Deserialize, Validate)]
struct QueryText {
    #[validate(length(max = 200, message = "Must be at most 200 characters"))]
    query: String,
}

/// Debounced text input.
async fn set_query(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<QueryText>,
) -> Result<(StatusCode, Json<SearchStateResponse>)> {
    validate_payload(&payload)?;
    state.search.set_query(&payload.query);
    Ok((StatusCode::ACCEPTED, current_state(&state)))
}

/// Immediate search (search button / Enter).
async fn submit_query(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<QueryText>,
) -> Result<Json<SearchStateResponse>> {
    validate_payload(&payload)?;
    if !state.search.submit_query(&payload.query) {
        return Err(AppError::BadRequest("Search query must not be empty".to_string()));
    }
    Ok(current_state(&state))
}

async fn set_filters(
    State(state): State<Arc<AppState>>,
    AppJson(filters): AppJson<SearchFilters>,
) -> Result<Json<SearchStateResponse>> {
    validate_payload(&filters)?;
    state.search.set_filters(filters);
    Ok(current_state(&state))
}

async fn clear_filters(State(state): State<Arc<AppState>>) -> Json<SearchStateResponse> {
    state.search.clear_filters();
    current_state(&state)
}

#[derive(Deserialize)]
struct CategoryBody {
    category: Category,
}

async fn set_category(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<CategoryBody>,
) -> Json<SearchStateResponse> {
    state.search.set_category(payload.category);
    current_state(&state)
}

/// Stream every snapshot change as a `search` event, starting with the current one.
async fn search_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let rx = state.search.subscribe();

    let events = stream::unfold((rx, true), |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let snapshot = rx.borrow_and_update().clone();
        let event = Event::default()
            .event("search")
            .json_data(&snapshot)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to encode search snapshot");
                Event::default().event("search")
            });
        Some((Ok(event), (rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
