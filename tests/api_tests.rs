use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use btc_positions::api::router::create_router;
use btc_positions::config::AppConfig;
use btc_positions::store::MemoryStore;
use btc_positions::AppState;

fn build_test_app() -> axum::Router {
    let config = AppConfig {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        table_name: "positions".into(),
        api_base_url: "http://localhost:8080".into(),
    };

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config,
        started_at: Instant::now(),
    };
    create_router(state)
}

async fn body_json(resp: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn sample_position() -> Value {
    json!({
        "symbol": "BTCUSDT",
        "quantity": 0.5,
        "type": "buy",
        "entry": 30000.0,
        "date": "2025-10-25T10:00:00Z",
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = build_test_app();

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["uptime"].is_number());
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_root_and_openapi() {
    let app = build_test_app();

    let resp = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "running");

    let resp = app.oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["info"]["title"], "Bitcoin Positions API");
    assert_eq!(json["servers"][0]["url"], "http://localhost:8080");
}

#[tokio::test]
async fn test_create_and_round_trip() {
    let app = build_test_app();

    let resp = app
        .clone()
        .oneshot(post_json("/positions", &sample_position()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["symbol"], "BTCUSDT");
    assert_eq!(created["type"], "buy");
    assert_eq!(created["entry"], 30000.0);

    // get(id) returns the created record, id included
    let resp = app
        .clone()
        .oneshot(get(&format!("/positions/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, created);

    // list contains it
    let resp = app.oneshot(get("/positions")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0], created);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let app = build_test_app();

    let a = body_json(
        app.clone()
            .oneshot(post_json("/positions", &sample_position()))
            .await
            .unwrap(),
    )
    .await;
    let b = body_json(
        app.oneshot(post_json("/positions", &sample_position()))
            .await
            .unwrap(),
    )
    .await;
    assert_ne!(a["id"], b["id"]);
}

#[tokio::test]
async fn test_create_missing_field_is_400_and_persists_nothing() {
    let app = build_test_app();

    for missing in ["symbol", "quantity", "type", "date"] {
        let mut body = sample_position();
        body.as_object_mut().unwrap().remove(missing);

        let resp = app
            .clone()
            .oneshot(post_json("/positions", &body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "missing {missing}");
        let json = body_json(resp).await;
        assert_eq!(json["error"], "Missing required fields");
    }

    let resp = app.oneshot(get("/positions")).await.unwrap();
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_empty_body_is_400_missing_fields() {
    let app = build_test_app();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/positions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Missing required fields");

    let resp = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/positions/p1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Missing required fields");
}

#[tokio::test]
async fn test_create_without_entry_defaults_to_zero() {
    let app = build_test_app();

    let mut body = sample_position();
    body.as_object_mut().unwrap().remove("entry");

    let resp = app
        .oneshot(post_json("/positions", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["entry"], 0.0);
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = build_test_app();

    let resp = app.oneshot(get("/positions/no-such-id")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["message"], "Not found");
}

#[tokio::test]
async fn test_replace_updates_all_fields() {
    let app = build_test_app();

    let created = body_json(
        app.clone()
            .oneshot(post_json("/positions", &sample_position()))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let update = json!({
        "symbol": "BTCUSDT",
        "quantity": 1.5,
        "type": "sell",
        "entry": 31000.0,
        "date": "2025-10-25T10:00:00Z",
    });
    let resp = app
        .clone()
        .oneshot(put_json(&format!("/positions/{id}"), &update))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["type"], "sell");
    assert_eq!(updated["quantity"], 1.5);

    let resp = app.oneshot(get(&format!("/positions/{id}"))).await.unwrap();
    assert_eq!(body_json(resp).await, updated);
}

#[tokio::test]
async fn test_replace_unknown_id_is_404() {
    let app = build_test_app();

    let resp = app
        .oneshot(put_json("/positions/no-such-id", &sample_position()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["message"], "Not found");
}

#[tokio::test]
async fn test_replace_with_missing_field_is_400() {
    let app = build_test_app();

    let created = body_json(
        app.clone()
            .oneshot(post_json("/positions", &sample_position()))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let mut update = sample_position();
    update.as_object_mut().unwrap().remove("entry");
    let resp = app
        .clone()
        .oneshot(put_json(&format!("/positions/{id}"), &update))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Missing required fields");

    // record unchanged
    let resp = app.oneshot(get(&format!("/positions/{id}"))).await.unwrap();
    assert_eq!(body_json(resp).await, created);
}

#[tokio::test]
async fn test_delete_then_get_is_404_and_delete_is_idempotent() {
    let app = build_test_app();

    let created = body_json(
        app.clone()
            .oneshot(post_json("/positions", &sample_position()))
            .await
            .unwrap(),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(delete(&format!("/positions/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "deleted": id }));

    let resp = app
        .clone()
        .oneshot(get(&format!("/positions/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // deleting again still confirms the id
    let resp = app
        .oneshot(delete(&format!("/positions/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "deleted": id }));
}

#[tokio::test]
async fn test_cors_preflight_and_response_headers() {
    let app = build_test_app();

    let preflight = Request::builder()
        .method("OPTIONS")
        .uri("/positions")
        .header("origin", "http://example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type,x-api-key")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(preflight).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
    let allow_methods = resp.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(allow_methods.contains(method));
    }

    // simple responses carry the origin header too
    let req = Request::builder()
        .uri("/positions")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}
