use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use btc_positions::models::{PositionInput, Side};
use btc_positions::tracker::{ApiClient, TrackerConfig};

fn client_for(server: &MockServer, api_key: Option<&str>) -> ApiClient {
    ApiClient::new(&TrackerConfig {
        api_url: server.uri(),
        api_key: api_key.map(str::to_string),
    })
}

#[tokio::test]
async fn list_positions_sends_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/positions"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p1",
            "symbol": "BTCUSDT",
            "quantity": 0.5,
            "type": "buy",
            "entry": 30000.0,
            "date": "2025-10-25T10:00:00Z",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("secret"));
    let positions = client.list_positions().await.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].id, "p1");
    assert_eq!(positions[0].side, Side::Buy);
}

#[tokio::test]
async fn create_position_posts_body_and_parses_created_record() {
    let server = MockServer::start().await;
    let input = PositionInput {
        symbol: Some("BTCUSDT".into()),
        quantity: Some("0.5".parse().unwrap()),
        side: Some(Side::Sell),
        entry: Some("30000".parse().unwrap()),
        date: Some("2025-10-25T10:00:00Z".into()),
    };

    Mock::given(method("POST"))
        .and(path("/positions"))
        .and(body_json(json!({
            "symbol": "BTCUSDT",
            "quantity": 0.5,
            "type": "sell",
            "entry": 30000.0,
            "date": "2025-10-25T10:00:00Z",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "fresh-id",
            "symbol": "BTCUSDT",
            "quantity": 0.5,
            "type": "sell",
            "entry": 30000.0,
            "date": "2025-10-25T10:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let created = client.create_position(&input).await.unwrap();
    assert_eq!(created.id, "fresh-id");
}

#[tokio::test]
async fn delete_position_returns_confirmed_id() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/positions/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": "p1" })))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    assert_eq!(client.delete_position("p1").await.unwrap(), "p1");
}

#[tokio::test]
async fn server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/positions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "table on fire" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.list_positions().await.unwrap_err();
    assert!(err.to_string().contains("table on fire"), "{err}");
}

#[tokio::test]
async fn validation_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/positions/p1"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": "Missing required fields" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client
        .update_position("p1", &PositionInput::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Missing required fields"), "{err}");
}
