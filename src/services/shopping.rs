// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shopping list stored under `shoppingList`.

use crate::db::{collections, LocalStore};
use crate::error::AppError;
use crate::models::shopping::{CATEGORY_CUSTOM, CATEGORY_RECIPE, SOURCE_MANUAL};
use crate::models::{RecipeDetails, ShoppingListItem, ShoppingProgress};

#[derive(Clone)]
pub struct ShoppingListService {
    store: LocalStore,
}

impl ShoppingListService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<ShoppingListItem> {
        self.store.read_collection(collections::SHOPPING_LIST)
    }

    pub fn progress(&self) -> ShoppingProgress {
        ShoppingProgress::of(&self.list())
    }

    /// Append one item per ingredient of `recipe`. Returns the new items.
    pub fn add_recipe_ingredients(
        &self,
        recipe: &RecipeDetails,
    ) -> Result<Vec<ShoppingListItem>, AppError> {
        let new_items: Vec<ShoppingListItem> = recipe
            .extended_ingredients
            .iter()
            .map(|ingredient| ShoppingListItem {
                id: new_item_id(),
                name: if ingredient.original.is_empty() {
                    ingredient.name.clone()
                } else {
                    ingredient.original.clone()
                },
                quantity: ingredient.quantity(),
                category: CATEGORY_RECIPE.to_string(),
                checked: false,
                added_from: recipe.recipe.title.clone(),
            })
            .collect();

        if new_items.is_empty() {
            return Ok(new_items);
        }

        let added = new_items.clone();
        self.store.update_collection(
            collections::SHOPPING_LIST,
            |items: &mut Vec<ShoppingListItem>| items.extend(new_items),
        )?;

        tracing::info!(
            recipe_id = recipe.recipe.id,
            count = added.len(),
            "Recipe ingredients added to shopping list"
        );
        Ok(added)
    }

    /// Add a hand-typed item. Blank names are rejected.
    pub fn add_custom(&self, name: &str) -> Result<ShoppingListItem, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Item name must not be empty".to_string()));
        }

        let item = ShoppingListItem {
            id: new_item_id(),
            name: name.to_string(),
            quantity: String::new(),
            category: CATEGORY_CUSTOM.to_string(),
            checked: false,
            added_from: SOURCE_MANUAL.to_string(),
        };

        let stored = item.clone();
        self.store.update_collection(
            collections::SHOPPING_LIST,
            |items: &mut Vec<ShoppingListItem>| items.push(stored),
        )?;
        Ok(item)
    }

    /// Flip `checked` on one item. Returns the updated item, or `None` if unknown.
    pub fn toggle(&self, item_id: &str) -> Result<Option<ShoppingListItem>, AppError> {
        self.store.update_collection(
            collections::SHOPPING_LIST,
            |items: &mut Vec<ShoppingListItem>| {
                items.iter_mut().find(|i| i.id == item_id).map(|item| {
                    item.checked = !item.checked;
                    item.clone()
                })
            },
        )
    }

    /// Remove one item. Returns whether it existed.
    pub fn remove(&self, item_id: &str) -> Result<bool, AppError> {
        self.store.update_collection(
            collections::SHOPPING_LIST,
            |items: &mut Vec<ShoppingListItem>| {
                let before = items.len();
                items.retain(|i| i.id != item_id);
                items.len() != before
            },
        )
    }

    /// Drop every checked item, keeping the rest in order. Returns how many went.
    pub fn clear_completed(&self) -> Result<usize, AppError> {
        let removed = self.store.update_collection(
            collections::SHOPPING_LIST,
            |items: &mut Vec<ShoppingListItem>| {
                let before = items.len();
                items.retain(|i| !i.checked);
                before - items.len()
            },
        )?;
        tracing::info!(removed, "Cleared completed shopping items");
        Ok(removed)
    }

    pub fn clear_all(&self) -> Result<(), AppError> {
        self.store.remove_collection(collections::SHOPPING_LIST)?;
        Ok(())
    }

    /// Plain-text export of the unchecked items, one `- name (quantity)` per line.
    pub fn export_text(&self) -> String {
        self.list()
            .iter()
            .filter(|item| !item.checked)
            .map(|item| {
                if item.quantity.is_empty() {
                    format!("- {}", item.name)
                } else {
                    format!("- {} ({})", item.name, item.quantity)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn new_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
