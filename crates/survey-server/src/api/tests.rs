use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, persistence, state::AppState};

async fn setup_app() -> (axum::Router, Arc<AppState>) {
    let mut config = Config::from_env();
    config.database_path = std::env::temp_dir()
        .join(format!("survey-test-{}.db", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();
    config.max_tree_height = 30;

    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await
        .expect("init db");
    let state = Arc::new(AppState::with_database(db, config));
    state.load_from_database().await.expect("load db");

    let app = api::routes().with_state(state.clone());
    (app, state)
}

async fn read_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn get(app: &axum::Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn create_estate(app: &axum::Router, length: i64, width: i64) -> String {
    let response = post_json(app, "/estate", json!({ "length": length, "width": width })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"]
        .as_str()
        .expect("estate id")
        .to_string()
}

async fn plant(app: &axum::Router, estate_id: &str, x: i64, y: i64, height: i64) -> Response {
    post_json(
        app,
        &format!("/estate/{}/tree", estate_id),
        json!({ "x": x, "y": y, "height": height }),
    )
    .await
}

async fn sample_estate(app: &axum::Router) -> String {
    let estate_id = create_estate(app, 5, 4).await;
    for (x, y, height) in [(2, 1, 5), (3, 1, 3), (4, 1, 4)] {
        let response = plant(app, &estate_id, x, y, height).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    estate_id
}

#[tokio::test]
async fn drone_plan_for_sample_estate() {
    let (app, _state) = setup_app().await;
    let estate_id = sample_estate(&app).await;

    let response = get(&app, &format!("/estate/{}/drone-plan?max_distance=100", estate_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "distance": 204, "rest": { "x": 2, "y": 2 } })
    );

    let response = get(&app, &format!("/estate/{}/drone-plan", estate_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "distance": 204 }));
}

#[tokio::test]
async fn drone_plan_for_empty_estate() {
    let (app, _state) = setup_app().await;
    let estate_id = create_estate(&app, 10, 10).await;

    let response = get(&app, &format!("/estate/{}/drone-plan?max_distance=30", estate_id)).await;
    assert_eq!(
        read_json(response).await,
        json!({ "distance": 0, "rest": { "x": 0, "y": 0 } })
    );

    let response = get(&app, &format!("/estate/{}/drone-plan?max_distance=0", estate_id)).await;
    assert_eq!(read_json(response).await, json!({ "distance": 0 }));
}

#[tokio::test]
async fn drone_plan_rejects_bad_budget() {
    let (app, _state) = setup_app().await;
    let estate_id = create_estate(&app, 3, 3).await;

    let response = get(&app, &format!("/estate/{}/drone-plan?max_distance=far", estate_id)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_for_estate() {
    let (app, _state) = setup_app().await;
    let estate_id = sample_estate(&app).await;

    let response = get(&app, &format!("/estate/{}/stats", estate_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "count": 3, "max": 5, "min": 3, "median": 4 })
    );

    let empty_id = create_estate(&app, 2, 2).await;
    let response = get(&app, &format!("/estate/{}/stats", empty_id)).await;
    assert_eq!(
        read_json(response).await,
        json!({ "count": 0, "max": 0, "min": 0, "median": 0 })
    );
}

#[tokio::test]
async fn reject_invalid_estate() {
    let (app, _state) = setup_app().await;

    let response = post_json(&app, "/estate", json!({ "length": 0, "width": 4 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "Invalid Request Body");

    let response = post_json(&app, "/estate", json!({ "length": "five" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reject_invalid_trees() {
    let (app, _state) = setup_app().await;
    let estate_id = create_estate(&app, 5, 4).await;

    let out_of_bounds = plant(&app, &estate_id, 6, 1, 5).await;
    assert_eq!(out_of_bounds.status(), StatusCode::BAD_REQUEST);

    let too_tall = plant(&app, &estate_id, 1, 1, 31).await;
    assert_eq!(too_tall.status(), StatusCode::BAD_REQUEST);

    let first = plant(&app, &estate_id, 1, 1, 10).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let duplicate = plant(&app, &estate_id, 1, 1, 12).await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(duplicate).await["message"], "Tree already exist");
}

#[tokio::test]
async fn unknown_and_malformed_estate_ids() {
    let (app, _state) = setup_app().await;
    let missing = uuid::Uuid::new_v4();

    let response = get(&app, &format!("/estate/{}/stats", missing)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["message"], "Estate not found");

    let response = get(&app, &format!("/estate/{}/drone-plan", missing)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = plant(&app, &missing.to_string(), 1, 1, 1).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/estate/not-a-uuid/stats").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["message"], "Invalid Estate ID");
}

#[tokio::test]
async fn estates_survive_restart() {
    let (app, state) = setup_app().await;
    let estate_id = sample_estate(&app).await;

    let config = state.config().clone();
    let db = persistence::init_database(&config.database_path, config.database_max_connections)
        .await
        .expect("reopen db");
    let reopened = Arc::new(AppState::with_database(db, config));
    reopened.load_from_database().await.expect("load db");

    let estate = reopened
        .get_estate(&estate_id)
        .await
        .unwrap()
        .expect("estate persisted");
    assert_eq!((estate.length, estate.width), (5, 4));
    assert_eq!(reopened.list_trees(&estate_id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let (app, _state) = setup_app().await;

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "survey-req-1")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "survey-req-1");

    let response = get(&app, "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn estate_id_accepts_any_uuid_spelling() {
    let (app, _state) = setup_app().await;
    let estate_id = sample_estate(&app).await;

    let response = get(&app, &format!("/estate/{}/stats", estate_id.to_uppercase())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["count"], 3);

    let response = get(
        &app,
        &format!("/estate/%7B{}%7D/drone-plan?max_distance=100", estate_id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["distance"], 204);

    let simple = estate_id.replace('-', "");
    let response = plant(&app, &simple, 5, 4, 2).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn bad_tree_body_rejected_before_estate_lookup() {
    let (app, _state) = setup_app().await;
    let missing = uuid::Uuid::new_v4().to_string();

    for (x, y, height) in [(1, 1, 0), (1, 1, 31), (0, 1, 5), (1, -2, 5)] {
        let response = plant(&app, &missing, x, y, height).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = plant(&app, &missing, 1, 1, 5).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
