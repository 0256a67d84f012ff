// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FlavourFi: recipe discovery backed by the Spoonacular API.
//!
//! This crate provides the local API server: recipe search with debounced
//! free text and filters, recipe details and nutrition, and the user's own
//! collections (favorites, shopping list, reviews, recently viewed) kept in
//! a local JSON store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::LocalStore;
use services::{
    FavoritesService, RecentlyViewedService, RecipeService, ReviewService, SearchController,
    ShoppingListService,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: LocalStore,
    pub recipes: RecipeService,
    pub search: SearchController,
    pub favorites: FavoritesService,
    pub shopping_list: ShoppingListService,
    pub reviews: ReviewService,
    pub recently_viewed: RecentlyViewedService,
}

impl AppState {
    /// Wire every service onto one store and one recipe client.
    pub fn new(config: Config, store: LocalStore) -> Self {
        let recipes = RecipeService::from_config(&config);
        let search = SearchController::new(recipes.clone(), config.search_debounce);

        Self {
            favorites: FavoritesService::new(store.clone()),
            shopping_list: ShoppingListService::new(store.clone()),
            reviews: ReviewService::new(store.clone()),
            recently_viewed: RecentlyViewedService::new(store.clone()),
            config,
            store,
            recipes,
            search,
        }
    }
}
