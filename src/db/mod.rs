//! Storage layer (local JSON collections).

pub mod local_store;

pub use local_store::{ChangeKind, ChangeOrigin, LocalStore, StoreEvent};

/// Collection keys. The values match the browser build's localStorage keys.
pub mod collections {
    pub const FAVORITES: &str = "favorites";
    pub const SHOPPING_LIST: &str = "shoppingList";
    pub const RECENTLY_VIEWED: &str = "recentlyViewed";
    /// Prefix of the per-recipe review collections
    pub const REVIEWS_PREFIX: &str = "reviews_";

    /// Key of the review collection for one recipe.
    pub fn reviews(recipe_id: u64) -> String {
        format!("{}{}", REVIEWS_PREFIX, recipe_id)
    }
}
