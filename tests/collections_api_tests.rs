// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorites, shopping list, reviews and recently viewed endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

use common::body_json;

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn recipe(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "image": "https://img.example/r.jpg",
        "readyInMinutes": 20,
        "sourceUrl": "https://example.com/r"
    })
}

// ─── Favorites ───────────────────────────────────────────────

#[tokio::test]
async fn test_favorite_toggle_round_trip() {
    let (app, _state, _mock) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/favorites/toggle", recipe(1, "Soup")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["favorite"], true);
    assert_eq!(body["count"], 1);

    let response = app.clone().oneshot(get("/api/favorites")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body[0]["title"], "Soup");
    // Fields we don't model survive the round trip.
    assert_eq!(body[0]["sourceUrl"], "https://example.com/r");

    let response = app.clone().oneshot(get("/api/favorites/1")).await.unwrap();
    assert_eq!(body_json(response).await["favorite"], true);

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/favorites/toggle", recipe(1, "Soup")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["favorite"], false);
    assert_eq!(body["count"], 0);

    let response = app.oneshot(get("/api/favorites/1")).await.unwrap();
    assert_eq!(body_json(response).await["favorite"], false);
}

#[tokio::test]
async fn test_favorite_remove_and_clear() {
    let (app, state, _mock) = common::create_test_app().await;

    for id in 1..=3 {
        app.clone()
            .oneshot(send_json("POST", "/api/favorites/toggle", recipe(id, "Dish")))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(empty("DELETE", "/api/favorites/2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(empty("DELETE", "/api/favorites/2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let ids: Vec<u64> = state.favorites.list().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let response = app
        .oneshot(empty("DELETE", "/api/favorites"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(state.favorites.list().is_empty());
}

#[tokio::test]
async fn test_favorite_toggle_rejects_missing_id() {
    let (app, _state, _mock) = common::create_test_app().await;

    let response = app
        .oneshot(send_json("POST", "/api/favorites/toggle", json!({"title": "No id"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
    assert!(body["details"].as_str().unwrap().contains("id"));
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let (app, state, _mock) = common::create_test_app().await;

    let broken = Request::builder()
        .method("POST")
        .uri("/api/shopping-list/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/favorites/toggle")
        .body(Body::from(r#"{"id": 1, "title": "Soup"}"#))
        .unwrap();

    for request in [
        broken,
        no_content_type,
        get("/api/favorites/abc"),
        get("/api/recipes/abc/reviews"),
        get("/api/recently-viewed?limit=lots"),
    ] {
        let uri = request.uri().to_string();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json",
            "{}",
            uri
        );
        let body = body_json(response).await;
        assert_eq!(body["error"], "bad_request", "{}", uri);
        assert!(body["details"].is_string(), "{}", uri);
    }

    assert!(state.favorites.list().is_empty());
    assert!(state.shopping_list.list().is_empty());
}

// ─── Shopping list ───────────────────────────────────────────

#[tokio::test]
async fn test_shopping_list_flow() {
    let (app, _state, _mock) = common::create_test_app().await;

    let details = json!({
        "id": 9,
        "title": "Pancakes",
        "extendedIngredients": [
            {"name": "flour", "original": "2 cups flour", "amount": 2.0, "unit": "cups"},
            {"name": "eggs", "original": "3 eggs", "amount": 3.0, "unit": ""}
        ]
    });
    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/shopping-list/recipe", details))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let added = body_json(response).await;
    assert_eq!(added.as_array().unwrap().len(), 2);
    assert_eq!(added[0]["quantity"], "2 cups");
    assert_eq!(added[0]["category"], "Recipe Ingredients");
    assert_eq!(added[0]["addedFrom"], "Pancakes");

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/shopping-list/items",
            json!({"name": "  Maple syrup "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let custom = body_json(response).await;
    assert_eq!(custom["name"], "Maple syrup");
    assert_eq!(custom["category"], "Custom");
    assert_eq!(custom["addedFrom"], "Manual");

    let flour_id = added[0]["id"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(empty(
            "POST",
            &format!("/api/shopping-list/items/{}/toggle", flour_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["checked"], true);

    let response = app.clone().oneshot(get("/api/shopping-list")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    assert_eq!(body["progress"]["checked"], 1);
    assert_eq!(body["progress"]["total"], 3);

    let response = app
        .clone()
        .oneshot(get("/api/shopping-list/export"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"shopping-list.txt\""
    );
    let text = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(
        std::str::from_utf8(&text).unwrap(),
        "- 3 eggs (3)\n- Maple syrup"
    );

    let response = app
        .clone()
        .oneshot(empty("POST", "/api/shopping-list/clear-completed"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["removed"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(empty("DELETE", "/api/shopping-list"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/api/shopping-list")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["progress"]["percent"], 0);
}

#[tokio::test]
async fn test_shopping_list_rejects_bad_input() {
    let (app, _state, _mock) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/shopping-list/items", json!({"name": ""})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(send_json("POST", "/api/shopping-list/items", json!({"name": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/shopping-list/recipe",
            json!({"id": 3, "title": "Air"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(empty("POST", "/api/shopping-list/items/nope/toggle"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty("DELETE", "/api/shopping-list/items/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ─── Reviews ─────────────────────────────────────────────────

#[tokio::test]
async fn test_reviews_submit_and_summary() {
    let (app, _state, _mock) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/recipes/5/reviews",
            json!({"rating": 4, "review": "Tasty", "recipeTitle": "Stew"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["averageRating"], 4.0);
    assert_eq!(body["userReview"]["userName"], "You");
    assert_eq!(body["userReview"]["review"], "Tasty");

    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/recipes/5/reviews",
            json!({"userId": "alex", "userName": "Alex", "rating": 5, "text": "Great"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Resubmitting replaces the earlier review by the same user.
    let response = app
        .clone()
        .oneshot(send_json(
            "POST",
            "/api/recipes/5/reviews",
            json!({"rating": 2, "review": "Too salty"}),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["averageRating"], 3.5);
    assert_eq!(body["userReview"]["rating"], 2);

    let response = app
        .clone()
        .oneshot(get("/api/recipes/5/reviews?userId=alex"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["userReview"]["review"], "Great");

    // Reviews are kept per recipe.
    let response = app.oneshot(get("/api/recipes/6/reviews")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], 0);
    assert_eq!(body["averageRating"], 0.0);
    assert!(body["userReview"].is_null());
}

#[tokio::test]
async fn test_reviews_reject_out_of_range_rating() {
    let (app, state, _mock) = common::create_test_app().await;

    for rating in [0, 6] {
        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/recipes/5/reviews",
                json!({"rating": rating, "review": "?"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    assert!(state.reviews.list(5).is_empty());
}

// ─── Recently viewed ─────────────────────────────────────────

#[tokio::test]
async fn test_recently_viewed() {
    let (app, _state, _mock) = common::create_test_app().await;

    for id in 1..=12 {
        let response = app
            .clone()
            .oneshot(send_json(
                "POST",
                "/api/recently-viewed",
                recipe(id, &format!("Recipe {}", id)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Viewing an older recipe again moves it to the front.
    app.clone()
        .oneshot(send_json("POST", "/api/recently-viewed", recipe(5, "Recipe 5")))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/api/recently-viewed")).await.unwrap();
    let body = body_json(response).await;
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![5, 12, 11, 10, 9, 8, 7, 6, 4, 3]);

    let response = app
        .oneshot(get("/api/recently-viewed?limit=2"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

// ─── Change feed ─────────────────────────────────────────────

#[tokio::test]
async fn test_events_endpoint_streams() {
    let (app, _state, _mock) = common::create_test_app().await;

    let response = app.oneshot(get("/api/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/event-stream"
    );
}
