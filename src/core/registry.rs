use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::config::QueueSpec;
use crate::core::error::QueueError;
use crate::core::message::QueueName;
use crate::core::queue::Queue;

/// [`QueueRegistry`] owns the fixed set of queues and provides name-keyed
/// lookup.
///
/// The registry is built once from the startup config and never changes
/// afterward: no queue creation, deletion or resizing at runtime. Lookups
/// therefore need no locking; only each queue's own state carries a
/// mutation boundary.
#[derive(Debug, Default)]
pub struct QueueRegistry {
    queues: DashMap<QueueName, Arc<Queue>>,
}

impl QueueRegistry {
    /// Builds the registry from the static queue specs.
    ///
    /// Fails with [`QueueError::DuplicateQueueName`] if two specs share a
    /// name; callers treat that as fatal and abort startup.
    pub fn from_specs(specs: &[QueueSpec]) -> Result<Self, QueueError> {
        let queues = DashMap::with_capacity(specs.len());

        for spec in specs {
            let queue = Arc::new(Queue::new(spec));
            if queues.insert(spec.name.clone(), queue).is_some() {
                return Err(QueueError::DuplicateQueueName {
                    queue: spec.name.clone(),
                });
            }
            debug!(queue = %spec.name, max_length = spec.max_length,
                   max_subscribers = spec.max_subscribers, "queue registered");
        }

        Ok(Self { queues })
    }

    /// Gets a queue by name.
    ///
    /// Returns `Some(queue)` if found, or `None` if it does not exist.
    /// This is the sole read path used by every service operation.
    pub fn lookup(&self, name: &str) -> Option<Arc<Queue>> {
        self.queues.get(name).map(|entry| Arc::clone(&*entry))
    }

    /// Lists all queues currently registered, in unspecified order.
    pub fn queues(&self) -> Vec<Arc<Queue>> {
        self.queues
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> QueueSpec {
        QueueSpec {
            name: name.to_string(),
            max_length: 4,
            max_subscribers: 2,
        }
    }

    #[test]
    fn builds_and_looks_up_queues() {
        let registry = QueueRegistry::from_specs(&[spec("orders"), spec("invoices")]).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("orders").is_some());
        assert!(registry.lookup("payments").is_none());
    }

    #[test]
    fn rejects_duplicate_queue_names() {
        let err = QueueRegistry::from_specs(&[spec("orders"), spec("orders")]).unwrap_err();

        assert!(matches!(err, QueueError::DuplicateQueueName { queue } if queue == "orders"));
    }
}
