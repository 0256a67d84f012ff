// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-recipe reviews stored under `reviews_<recipeId>`.

use chrono::{SecondsFormat, Utc};
use crate::db::{collections, LocalStore};
use crate::error::AppError;
use crate::models::review::DEFAULT_USER_NAME;
use crate::models::{Review, ReviewSummary};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A review as submitted by the client.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: String,
    pub user_name: Option<String>,
    pub rating: u8,
    pub text: String,
    pub recipe_title: String,
}

#[derive(Clone)]
pub struct ReviewService {
    store: LocalStore,
}

impl ReviewService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self, recipe_id: u64) -> Vec<Review> {
        self.store.read_collection(&collections::reviews(recipe_id))
    }

    pub fn summary(&self, recipe_id: u64, user_id: &str) -> ReviewSummary {
        ReviewSummary::new(recipe_id, self.list(recipe_id), user_id)
    }

    /// Store a review, replacing any earlier review by the same user.
    pub fn submit(&self, recipe_id: u64, new: NewReview) -> Result<Review, AppError> {
        if !(MIN_RATING..=MAX_RATING).contains(&new.rating) {
            return Err(AppError::BadRequest(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let review = Review {
            id: uuid::Uuid::new_v4().to_string(),
            user_name: new
                .user_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            user_id: new.user_id,
            rating: new.rating,
            text: new.text.trim().to_string(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            recipe_id,
            recipe_title: new.recipe_title,
        };

        let stored = review.clone();
        let replaced = self.store.update_collection(
            &collections::reviews(recipe_id),
            |reviews: &mut Vec<Review>| {
                let before = reviews.len();
                reviews.retain(|r| r.user_id != stored.user_id);
                let replaced = reviews.len() != before;
                reviews.push(stored);
                replaced
            },
        )?;

        tracing::info!(
            recipe_id,
            user_id = %review.user_id,
            rating = review.rating,
            replaced,
            "Review submitted"
        );
        Ok(review)
    }
}
