// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recipe reviews (star rating plus optional comment).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User id used when the client doesn't send one (single-user app).
pub const DEFAULT_USER_ID: &str = "currentUser";
/// Display name paired with `DEFAULT_USER_ID`.
pub const DEFAULT_USER_NAME: &str = "You";

/// A review stored under `reviews_<recipeId>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Review {
    #[serde(deserialize_with = "super::id_from_string_or_number")]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    /// 1 to 5 stars
    pub rating: u8,
    /// Free-text comment, possibly empty
    #[serde(default, rename = "review", alias = "text")]
    pub text: String,
    /// RFC3339 submission time
    pub date: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub recipe_id: u64,
    #[serde(default)]
    pub recipe_title: String,
}

/// Aggregate shown above the review list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReviewSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub recipe_id: u64,
    /// Mean rating rounded to one decimal; 0 when there are no reviews
    pub average_rating: f64,
    pub count: u32,
    pub user_review: Option<Review>,
    pub reviews: Vec<Review>,
}

impl ReviewSummary {
    pub fn new(recipe_id: u64, reviews: Vec<Review>, user_id: &str) -> Self {
        let count = reviews.len() as u32;
        let average_rating = if reviews.is_empty() {
            0.0
        } else {
            let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            ((sum as f64 / reviews.len() as f64) * 10.0).round() / 10.0
        };
        let user_review = reviews.iter().find(|r| r.user_id == user_id).cloned();

        Self {
            recipe_id,
            average_rating,
            count,
            user_review,
            reviews,
        }
    }
}
