// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite recipes, stored as recipe snapshots under `favorites`.

use crate::db::{collections, LocalStore};
use crate::error::AppError;
use crate::models::Recipe;

#[derive(Clone)]
pub struct FavoritesService {
    store: LocalStore,
}

impl FavoritesService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Favorites in the order they were added.
    pub fn list(&self) -> Vec<Recipe> {
        self.store.read_collection(collections::FAVORITES)
    }

    pub fn is_favorite(&self, recipe_id: u64) -> bool {
        self.list().iter().any(|r| r.id == recipe_id)
    }

    /// Flip the favorite state of a recipe. Returns `true` if it is now a favorite.
    pub fn toggle(&self, recipe: Recipe) -> Result<bool, AppError> {
        let recipe_id = recipe.id;
        let now_favorite =
            self.store
                .update_collection(collections::FAVORITES, |favs: &mut Vec<Recipe>| {
                    let before = favs.len();
                    favs.retain(|r| r.id != recipe.id);
                    if favs.len() == before {
                        favs.push(recipe);
                        true
                    } else {
                        false
                    }
                })?;

        tracing::info!(recipe_id, favorite = now_favorite, "Favorite toggled");
        Ok(now_favorite)
    }

    /// Remove a favorite. Returns whether it was present.
    pub fn remove(&self, recipe_id: u64) -> Result<bool, AppError> {
        self.store
            .update_collection(collections::FAVORITES, |favs: &mut Vec<Recipe>| {
                let before = favs.len();
                favs.retain(|r| r.id != recipe_id);
                favs.len() != before
            })
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove_collection(collections::FAVORITES)?;
        tracing::info!("Favorites cleared");
        Ok(())
    }
}
