// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Spoonacular API root.
pub const DEFAULT_RECIPE_API_URL: &str = "https://api.spoonacular.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spoonacular API key (sent as the `apiKey` query parameter)
    pub recipe_api_key: String,
    /// Spoonacular API root, overridable for tests and proxies
    pub recipe_api_url: String,
    /// Directory holding the local collections (`favorites.json`, ...)
    pub data_dir: PathBuf,
    /// Frontend URL, used for CORS and share links
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Delay between the last keystroke and the search request
    pub search_debounce: Duration,
    /// Number of results requested per search
    pub search_result_count: u32,
    /// How often the store re-reads the data directory; `None` disables polling
    pub store_poll_interval: Option<Duration>,
}

impl Config {
    /// Config for tests: no network key, in-memory friendly defaults.
    pub fn test_default() -> Self {
        Self {
            recipe_api_key: "test_api_key".to_string(),
            recipe_api_url: "http://127.0.0.1:9".to_string(),
            data_dir: PathBuf::from("data"),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            search_debounce: Duration::from_millis(50),
            search_result_count: 20,
            store_poll_interval: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let recipe_api_key = env::var("SPOONACULAR_API_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("SPOONACULAR_API_KEY"))?;
        if recipe_api_key.is_empty() {
            return Err(ConfigError::Missing("SPOONACULAR_API_KEY"));
        }

        let poll_secs: u64 = parse_var("STORE_POLL_SECS", 1)?;

        Ok(Self {
            recipe_api_key,
            recipe_api_url: env::var("SPOONACULAR_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_RECIPE_API_URL.to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            search_debounce: Duration::from_millis(parse_var("SEARCH_DEBOUNCE_MS", 6000)?),
            search_result_count: parse_var("SEARCH_RESULT_COUNT", 20)?,
            store_poll_interval: (poll_secs > 0).then(|| Duration::from_secs(poll_secs)),
        })
    }
}

/// Parse a numeric variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
