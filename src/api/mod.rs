//! HTTP transport adapter.
//!
//! A thin layer over [`crate::core::QueueService`]: routes map onto
//! service operations one-to-one, domain errors map onto status codes,
//! and subscriber identity travels in the `X-Subscriber` header. No
//! business rules live here.

pub mod handlers;
pub mod routes;
pub mod server;

pub use routes::create_router;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::sync::Arc;

use crate::core::{QueueError, QueueService};

/// Shared state handed to every handler.
pub type AppState = Arc<QueueService>;

/// Adapter-level error: either a domain error from the core or a request
/// the adapter rejected before calling the core.
#[derive(Debug)]
pub enum ApiError {
    Queue(QueueError),
    SubscriberHeader(&'static str),
}

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        ApiError::Queue(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Queue(err) => {
                let status = match err {
                    QueueError::NotFound { .. } => StatusCode::NOT_FOUND,
                    // Startup-only; reaching here would be a bug.
                    QueueError::DuplicateQueueName { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, err.to_string())
            }
            ApiError::SubscriberHeader(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
        };

        (status, Json(message)).into_response()
    }
}
