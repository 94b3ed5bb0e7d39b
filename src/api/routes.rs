use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::{Any, CorsLayer}, timeout::TimeoutLayer, trace::TraceLayer};

use crate::api::{handlers, AppState};

/// Builds the complete router.
///
/// `/v1/queues/...` is the public surface; `/v1/int/queues/...` exposes
/// whole-queue snapshots for introspection. The timeout layer answers 408
/// on overrun regardless of what the handler is doing; the core itself
/// never blocks on I/O.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/v1/int/queues", get(handlers::get_all))
        .route("/v1/int/queues/{queue_name}", get(handlers::get_by_name))
        .route(
            "/v1/queues/{queue_name}/subscriptions",
            post(handlers::subscribe),
        )
        .route(
            "/v1/queues/{queue_name}/messages",
            post(handlers::add_message).get(handlers::consume),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

/// Permissive CORS; `Any` on headers covers `X-Subscriber`.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
