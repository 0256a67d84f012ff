// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use flavourfi::config::Config;
use flavourfi::db::LocalStore;
use flavourfi::routes::create_router;
use flavourfi::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// API key the mock upstream accepts.
#[allow(dead_code)]
pub const TEST_API_KEY: &str = "test_api_key";

/// Queries starting with this are answered after `SLOW_DELAY`.
#[allow(dead_code)]
pub const SLOW_PREFIX: &str = "slow";

#[allow(dead_code)]
pub const SLOW_DELAY: Duration = Duration::from_millis(300);

/// Query string of one upstream request.
pub type RecordedRequest = HashMap<String, String>;

/// In-process stand-in for the Spoonacular API.
///
/// - `complexSearch` answers with three recipes whose titles echo the query
///   and category. The query `fail` gets a 500.
/// - `information` and `nutritionWidget` 404 for recipe id 404.
/// - Requests without `apiKey=test_api_key` get a 401.
#[derive(Clone)]
pub struct MockRecipeApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<(String, RecordedRequest)>>>,
}

#[allow(dead_code)]
impl MockRecipeApi {
    pub async fn start() -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/recipes/complexSearch", get(complex_search))
            .route("/recipes/random", get(random))
            .route("/recipes/{id}/information", get(information))
            .route("/recipes/{id}/nutritionWidget.json", get(nutrition))
            .with_state(requests.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Every recorded request to `path` (e.g. `/recipes/complexSearch`).
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }

    /// Queries sent to `complexSearch`, in arrival order.
    pub fn search_queries(&self) -> Vec<String> {
        self.requests_to("/recipes/complexSearch")
            .into_iter()
            .map(|q| q.get("query").cloned().unwrap_or_default())
            .collect()
    }
}

type Recorder = Arc<Mutex<Vec<(String, RecordedRequest)>>>;

fn record(recorder: &Recorder, path: String, params: &RecordedRequest) -> bool {
    recorder.lock().unwrap().push((path, params.clone()));
    params.get("apiKey").map(String::as_str) == Some(TEST_API_KEY)
}

fn recipe_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "image": format!("https://img.example/{}.jpg", id),
        "readyInMinutes": 25,
        "servings": 4,
        "cuisines": ["Italian"],
        "diets": [],
        "dishTypes": ["dinner"],
        "healthScore": 42.0
    })
}

async fn complex_search(
    State(recorder): State<Recorder>,
    Query(params): Query<RecordedRequest>,
) -> impl IntoResponse {
    if !record(&recorder, "/recipes/complexSearch".to_string(), &params) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"status": "failure"})));
    }

    let query = params.get("query").cloned().unwrap_or_default();
    if query == "fail" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "failure"})),
        );
    }
    if query.starts_with(SLOW_PREFIX) {
        tokio::time::sleep(SLOW_DELAY).await;
    }

    let label = match params.get("type") {
        Some(kind) => format!("{} {}", query, kind),
        None => query.clone(),
    };
    let label = label.trim();
    let results: Vec<Value> = (1..=3)
        .map(|i| recipe_json(i, &format!("{} #{}", label, i)))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "results": results,
            "offset": 0,
            "number": results.len(),
            "totalResults": results.len()
        })),
    )
}

async fn random(
    State(recorder): State<Recorder>,
    Query(params): Query<RecordedRequest>,
) -> impl IntoResponse {
    if !record(&recorder, "/recipes/random".to_string(), &params) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    (
        StatusCode::OK,
        Json(json!({ "recipes": [recipe_json(7, "Surprise Stew")] })),
    )
}

async fn information(
    State(recorder): State<Recorder>,
    Path(id): Path<u64>,
    Query(params): Query<RecordedRequest>,
) -> impl IntoResponse {
    if !record(&recorder, format!("/recipes/{}/information", id), &params) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({"status": "failure"})));
    }

    let mut details = recipe_json(id, &format!("Recipe {}", id));
    details["summary"] = json!("A <b>tasty</b> dish.");
    details["instructions"] = json!("Cook it.");
    details["extendedIngredients"] = json!([
        {"id": 1, "name": "flour", "original": "2 cups flour", "amount": 2.0, "unit": "cups"},
        {"id": 2, "name": "eggs", "original": "3 eggs", "amount": 3.0, "unit": ""}
    ]);
    details["analyzedInstructions"] = json!([
        {"name": "", "steps": [{"number": 1, "step": "Mix.", "ingredients": []}]}
    ]);
    (StatusCode::OK, Json(details))
}

async fn nutrition(
    State(recorder): State<Recorder>,
    Path(id): Path<u64>,
    Query(params): Query<RecordedRequest>,
) -> impl IntoResponse {
    if !record(&recorder, format!("/recipes/{}/nutritionWidget.json", id), &params) {
        return (StatusCode::UNAUTHORIZED, Json(json!({})));
    }
    if id == 404 {
        return (StatusCode::NOT_FOUND, Json(json!({"status": "failure"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "calories": "316",
            "carbs": "49g",
            "fat": "12g",
            "protein": "3g",
            "bad": [{"title": "Calories", "amount": "316", "percentOfDailyNeeds": 15.8}],
            "good": [{"title": "Protein", "amount": "3g", "percentOfDailyNeeds": 6.0}]
        })),
    )
}

/// Config pointing at `mock`, with a short debounce.
#[allow(dead_code)]
pub fn test_config(mock: &MockRecipeApi) -> Config {
    Config {
        recipe_api_url: mock.base_url.clone(),
        ..Config::test_default()
    }
}

/// Create a test app backed by an in-memory store and a mock upstream.
/// Returns the router, the shared state, and the mock.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>, MockRecipeApi) {
    let mock = MockRecipeApi::start().await;
    let state = Arc::new(AppState::new(test_config(&mock), LocalStore::new_in_memory()));
    (create_router(state.clone()), state, mock)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
