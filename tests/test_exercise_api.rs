// tests/test_exercise_api.rs


use axum::http::StatusCode;
use tower::ServiceExt;

use test_helpers::{app_with_state, create_test_app_state, json_request, response_json};

#[tokio::test]
async fn test_exercise_catalog_listing_and_filters() {
    let state = create_test_app_state().await;
    state.exercise_store.seed_defaults().await.unwrap();
    let app = app_with_state(state);

    println!("🌐 Testing exercise REST API...");

    println!("\n📮 GET /api/exercises");
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/exercises", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "success");

    let exercises = body["data"].as_array().unwrap();
    assert_eq!(exercises.len(), 5);
    // Easiest and shortest first
    assert_eq!(exercises[0]["title"], "Gratitude List");
    assert_eq!(
        exercises.last().unwrap()["title"],
        "Mindfulness Meditation"
    );
    assert!(exercises[0]["_id"].as_str().is_some());
    assert!(exercises[0]["steps"].as_array().is_some_and(|s| !s.is_empty()));
    println!("✅ Catalog listed in difficulty/duration order");

    println!("\n📮 GET /api/exercises?category=sadness");
    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/exercises?category=sadness", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Gratitude List", "Journaling"]);

    println!("\n📮 GET /api/exercises?difficulty=intermediate&duration=10");
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/exercises?difficulty=intermediate&duration=10",
            None,
        ))
        .await
        .unwrap();
    let body = response_json(response).await;
    let exercises = body["data"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["title"], "Mindfulness Meditation");
    println!("✅ Filters narrowed the catalog");
}

#[tokio::test]
async fn test_exercise_list_rejects_unknown_difficulty() {
    let app = test_helpers::create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/exercises?difficulty=expert", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("beginner, intermediate, advanced"));
}

#[tokio::test]
async fn test_random_exercise_draw() {
    let state = create_test_app_state().await;
    state.exercise_store.seed_defaults().await.unwrap();
    let app = app_with_state(state);

    println!("\n📮 GET /api/exercises/random?category=loneliness");
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/exercises/random?category=loneliness",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    // The seed catalog has exactly one loneliness exercise.
    assert_eq!(body["data"]["title"], "Social Connection");

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/exercises/random", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    println!("✅ Random draw returned a catalog entry");
}

#[tokio::test]
async fn test_random_exercise_empty_catalog_is_not_found() {
    // No seeding: the table is empty.
    let app = test_helpers::create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/exercises/random", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "No exercises found");
}
