// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe ratings and reviews.

use crate::error::Result;
use crate::models::review::DEFAULT_USER_ID;
use crate::models::ReviewSummary;
use crate::routes::extract::{AppJson, AppPath, AppQuery};
use crate::routes::validate_payload;
use crate::services::reviews::NewReview;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/recipes/{id}/reviews",
        get(get_reviews).post(submit_review),
    )
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewsQuery {
    #[serde(default = "default_user_id")]
    user_id: String,
}

async fn get_reviews(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
    AppQuery(params): AppQuery<ReviewsQuery>,
) -> Json<ReviewSummary> {
    Json(state.reviews.summary(id, &params.user_id))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct SubmitReviewRequest {
    #[serde(default = "default_user_id")]
    #[validate(length(min = 1, max = 64, message = "Must be 1-64 characters"))]
    user_id: String,
    #[validate(length(max = 64, message = "Must be at most 64 characters"))]
    user_name: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Please select a rating between 1 and 5"))]
    rating: u8,
    #[serde(default, alias = "text")]
    #[validate(length(max = 2000, message = "Must be at most 2000 characters"))]
    review: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "Must be at most 200 characters"))]
    recipe_title: String,
}

/// Submit (or replace) the caller's review. Responds with the updated summary.
async fn submit_review(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<u64>,
    AppJson(payload): AppJson<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ReviewSummary>)> {
    validate_payload(&payload)?;

    let user_id = payload.user_id.clone();
    state.reviews.submit(
        id,
        NewReview {
            user_id: payload.user_id,
            user_name: payload.user_name,
            rating: payload.rating,
            text: payload.review,
            recipe_title: payload.recipe_title,
        },
    )?;

    Ok((StatusCode::CREATED, Json(state.reviews.summary(id, &user_id))))
}
