use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::Value;
use std::collections::HashMap;

use crate::api::{ApiError, AppState};
use crate::core::message::MessageId;
use crate::core::QueueSnapshot;

const SUBSCRIBER_HEADER: &str = "x-subscriber";

/// `GET /v1/int/queues`
pub async fn get_all(State(service): State<AppState>) -> Json<Vec<QueueSnapshot>> {
    Json(service.get_all().await)
}

/// `GET /v1/int/queues/{queue_name}`
pub async fn get_by_name(
    State(service): State<AppState>,
    Path(queue_name): Path<String>,
) -> Result<Json<QueueSnapshot>, ApiError> {
    Ok(Json(service.get_by_name(&queue_name).await?))
}

/// `POST /v1/queues/{queue_name}/subscriptions`
pub async fn subscribe(
    State(service): State<AppState>,
    Path(queue_name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<String>, ApiError> {
    let subscriber = subscriber_from_headers(&headers)?;
    service.add_subscriber(&queue_name, &subscriber).await?;

    Ok(Json(format!(
        "subscriber {subscriber} has subscribed to queue {queue_name}"
    )))
}

/// `POST /v1/queues/{queue_name}/messages`
pub async fn add_message(
    State(service): State<AppState>,
    Path(queue_name): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<String>, ApiError> {
    service.add_message(&queue_name, body).await?;

    Ok(Json(format!("message has been added to queue {queue_name}")))
}

/// `GET /v1/queues/{queue_name}/messages`
pub async fn consume(
    State(service): State<AppState>,
    Path(queue_name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<HashMap<MessageId, Value>>, ApiError> {
    let subscriber = subscriber_from_headers(&headers)?;
    let messages = service.consume_messages(&queue_name, &subscriber).await?;

    Ok(Json(messages))
}

/// Pulls the caller's identity out of the `X-Subscriber` header. Exactly
/// one value is required; the core never sees requests that fail here.
fn subscriber_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    let mut values = headers.get_all(SUBSCRIBER_HEADER).iter();

    let value = values
        .next()
        .ok_or(ApiError::SubscriberHeader("failed to parse X-Subscriber header"))?;
    if values.next().is_some() {
        return Err(ApiError::SubscriberHeader(
            "only one subscriber in X-Subscriber header is allowed",
        ));
    }

    value
        .to_str()
        .map(str::to_owned)
        .map_err(|_| ApiError::SubscriberHeader("X-Subscriber header must be valid UTF-8"))
}
