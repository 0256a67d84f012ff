// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Search criteria: free text, filters, and the category selector.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Recipe category as shown in the category picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Appetizer,
    Beverage,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::All,
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Dessert,
        Category::Snack,
        Category::Appetizer,
        Category::Beverage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Breakfast => "breakfast",
            Category::Lunch => "lunch",
            Category::Dinner => "dinner",
            Category::Dessert => "dessert",
            Category::Snack => "snack",
            Category::Appetizer => "appetizer",
            Category::Beverage => "beverage",
        }
    }

    /// Spoonacular `type` value for this category; `None` means no type filter.
    pub fn api_type(self) -> Option<&'static str> {
        match self {
            Category::All => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Filter selections. Unset or blank fields mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64, message = "Must be at most 64 characters"))]
    pub diet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64, message = "Must be at most 64 characters"))]
    pub cuisine: Option<String>,
    /// Minutes
    #[serde(
        default,
        deserialize_with = "deserialize_minutes",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 1, max = 1440, message = "Must be between 1 and 1440"))]
    pub max_ready_time: Option<u32>,
    /// Comma-separated, as the API expects ("dairy,egg")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 256, message = "Must be at most 256 characters"))]
    pub intolerances: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32, message = "Must be at most 32 characters"))]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 64, message = "Must be at most 64 characters"))]
    pub cooking_method: Option<String>,
}

impl SearchFilters {
    /// Trim every text field and drop the blank ones.
    pub fn normalized(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }

        Self {
            diet: clean(self.diet),
            cuisine: clean(self.cuisine),
            max_ready_time: self.max_ready_time,
            intolerances: clean(self.intolerances),
            difficulty: clean(self.difficulty),
            cooking_method: clean(self.cooking_method),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MinutesInput {
    Number(u32),
    Text(String),
}

/// Accepts `30`, `"30"` or a blank string. Blank clears the limit.
pub(crate) fn deserialize_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<MinutesInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(MinutesInput::Number(n)) => Ok(Some(n)),
        Some(MinutesInput::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid number of minutes: {:?}", s)))
        }
    }
}

/// The combined query handed to the API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default)]
    pub category: Category,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            query: "chicken".to_string(),
            filters: SearchFilters::default(),
            category: Category::All,
        }
    }
}
