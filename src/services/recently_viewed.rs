// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recently viewed recipes, newest first, stored under `recentlyViewed`.

use crate::db::{collections, LocalStore};
use crate::error::AppError;
use crate::models::Recipe;

/// Maximum number of entries kept.
pub const MAX_RECENTLY_VIEWED: usize = 10;

#[derive(Clone)]
pub struct RecentlyViewedService {
    store: LocalStore,
}

impl RecentlyViewedService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Up to `limit` entries, most recent first.
    pub fn list(&self, limit: Option<usize>) -> Vec<Recipe> {
        let mut recipes: Vec<Recipe> = self.store.read_collection(collections::RECENTLY_VIEWED);
        recipes.truncate(limit.unwrap_or(MAX_RECENTLY_VIEWED).min(MAX_RECENTLY_VIEWED));
        recipes
    }

    /// Move `recipe` to the front, dropping any older copy and the overflow.
    pub fn record(&self, recipe: Recipe) -> Result<Vec<Recipe>, AppError> {
        let recipe_id = recipe.id;
        let updated = self.store.update_collection(
            collections::RECENTLY_VIEWED,
            |recent: &mut Vec<Recipe>| {
                recent.retain(|r| r.id != recipe.id);
                recent.insert(0, recipe);
                recent.truncate(MAX_RECENTLY_VIEWED);
                recent.clone()
            },
        )?;

        tracing::debug!(recipe_id, count = updated.len(), "Recorded recipe view");
        Ok(updated)
    }
}
