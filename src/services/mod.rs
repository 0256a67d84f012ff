// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod favorites;
pub mod recently_viewed;
pub mod recipe_api;
pub mod reviews;
pub mod search;
pub mod share;
pub mod shopping;

pub use favorites::FavoritesService;
pub use recently_viewed::RecentlyViewedService;
pub use recipe_api::{RecipeService, SpoonacularClient};
pub use reviews::ReviewService;
pub use search::{SearchController, SearchSnapshot};
pub use share::ShareLinks;
pub use shopping::ShoppingListService;
