use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::core::error::QueueError;
use crate::core::message::{MessageId, QueueName};
use crate::core::queue::{Queue, QueueSnapshot};
use crate::core::registry::QueueRegistry;

/// Stateless façade over the [`QueueRegistry`]: translates lookups into
/// [`QueueError::NotFound`] and delegates rule enforcement to the queue
/// itself, where it runs under the per-queue lock.
#[derive(Debug)]
pub struct QueueService {
    registry: Arc<QueueRegistry>,
}

impl QueueService {
    pub fn new(registry: Arc<QueueRegistry>) -> Self {
        Self { registry }
    }

    fn queue(&self, name: &str) -> Result<Arc<Queue>, QueueError> {
        self.registry.lookup(name).ok_or_else(|| QueueError::NotFound {
            queue: name.to_string(),
        })
    }

    /// Snapshot of a single queue by name.
    pub async fn get_by_name(&self, name: &str) -> Result<QueueSnapshot, QueueError> {
        Ok(self.queue(name)?.snapshot().await)
    }

    /// Snapshots of every queue, in unspecified order.
    pub async fn get_all(&self) -> Vec<QueueSnapshot> {
        let mut snapshots = Vec::with_capacity(self.registry.len());
        for queue in self.registry.queues() {
            snapshots.push(queue.snapshot().await);
        }
        snapshots
    }

    /// Adds `subscriber` to the queue's subscriber set.
    pub async fn add_subscriber(
        &self,
        queue_name: &str,
        subscriber: &str,
    ) -> Result<(), QueueError> {
        self.queue(queue_name)?.add_subscriber(subscriber).await?;
        info!(queue = %queue_name, %subscriber, "subscribed");
        Ok(())
    }

    /// Publishes a JSON body into the queue, returning the generated
    /// message id.
    pub async fn add_message(
        &self,
        queue_name: &str,
        body: Value,
    ) -> Result<MessageId, QueueError> {
        let id = self.queue(queue_name)?.add_message(body).await?;
        info!(queue = %queue_name, message_id = %id, "message published");
        Ok(id)
    }

    /// Returns every message `subscriber` has not yet seen, exactly once
    /// across calls, and garbage-collects messages now seen by all
    /// subscribers.
    pub async fn consume_messages(
        &self,
        queue_name: &str,
        subscriber: &str,
    ) -> Result<HashMap<MessageId, Value>, QueueError> {
        let messages = self.queue(queue_name)?.consume(subscriber).await?;
        info!(queue = %queue_name, %subscriber, delivered = messages.len(), "consumed");
        Ok(messages)
    }

    /// Names of all registered queues; handy for startup logging.
    pub fn queue_names(&self) -> Vec<QueueName> {
        self.registry
            .queues()
            .iter()
            .map(|q| q.name().clone())
            .collect()
    }
}
