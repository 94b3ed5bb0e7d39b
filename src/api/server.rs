use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::config::Config;
use crate::core::{QueueRegistry, QueueService};

/// Builds the registry and service from `config` and serves the HTTP API
/// until the process is killed.
///
/// Fails fast on a duplicate queue name or an unbindable address; both
/// are startup errors with nothing to recover.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let registry = Arc::new(QueueRegistry::from_specs(&config.queues)?);
    let service = Arc::new(QueueService::new(registry));

    info!(
        queues = ?service.queue_names(),
        "queue registry initialized"
    );

    let app = create_router(
        service,
        Duration::from_millis(config.server.request_timeout_ms),
    );

    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    info!("broadq listening on {}", config.server.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
