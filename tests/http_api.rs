mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use broadq::api::create_router;
use broadq::config::QueueSpec;
use broadq::core::{QueueRegistry, QueueService};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    common::init_logging();
    let registry = QueueRegistry::from_specs(&[QueueSpec {
        name: "orders".to_string(),
        max_length: 10,
        max_subscribers: 2,
    }])
    .expect("failed to build registry");
    let service = Arc::new(QueueService::new(Arc::new(registry)));
    create_router(service, Duration::from_secs(5))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

fn subscribe_req(queue: &str, subscriber: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/v1/queues/{queue}/subscriptions"))
        .header("X-Subscriber", subscriber)
        .body(Body::empty())
        .unwrap()
}

fn publish_req(queue: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/v1/queues/{queue}/messages"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn consume_req(queue: &str, subscriber: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/v1/queues/{queue}/messages"))
        .header("X-Subscriber", subscriber)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn full_pubsub_round_trip() {
    let app = app();
    let msg = json!({"msg": "hello"});

    let response = app.clone().oneshot(subscribe_req("orders", "s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(publish_req("orders", &msg)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(consume_req("orders", "s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let messages: HashMap<String, Value> =
        serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages.values().next(), Some(&msg));

    // Second consume: already seen, nothing left.
    let response = app.clone().oneshot(consume_req("orders", "s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({}));
}

#[tokio::test]
async fn unknown_queue_is_404() {
    let app = app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/int/queues/ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(subscribe_req("ghost", "s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(publish_req("ghost", &json!({"msg": "hi"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_subscriber_header_is_400() {
    let app = app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/queues/orders/subscriptions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicated_subscriber_header_is_400() {
    let app = app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/queues/orders/subscriptions")
                .header("X-Subscriber", "s1")
                .header("X-Subscriber", "s2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn domain_rejections_are_400() {
    let app = app();

    // Double subscription.
    let response = app.clone().oneshot(subscribe_req("orders", "s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.clone().oneshot(subscribe_req("orders", "s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Consume without being subscribed.
    let response = app.clone().oneshot(consume_req("orders", "nobody")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn introspection_lists_queues_and_state() {
    let app = app();

    let response = app.clone().oneshot(subscribe_req("orders", "s1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .clone()
        .oneshot(publish_req("orders", &json!({"msg": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/v1/int/queues").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let queues = body_json(response).await;
    let queues = queues.as_array().expect("expected a JSON array");
    assert_eq!(queues.len(), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/int/queues/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let queue = body_json(response).await;
    assert_eq!(queue["name"], "orders");
    assert_eq!(queue["max_length"], 10);
    assert_eq!(queue["subscribers"], json!(["s1"]));
    assert_eq!(queue["messages"].as_object().unwrap().len(), 1);
}
