use std::fmt;

/// Every way a queue operation can fail.
///
/// All variants are deterministic given current state: nothing in here is
/// transient, so the core never retries. `DuplicateQueueName` can only
/// occur while building the registry at startup and is fatal there.
#[derive(Debug, Clone)]
pub enum QueueError {
    /// The referenced queue does not exist in the registry.
    NotFound { queue: String },
    /// The subscriber is already in the queue's subscriber set.
    AlreadySubscribed { queue: String, subscriber: String },
    /// The queue already holds `max_subscribers` subscribers.
    SubscriberCapacityExceeded { queue: String, max: usize },
    /// The queue already holds `max_length` messages.
    MessageCapacityExceeded { queue: String, max: usize },
    /// A consume was attempted by an identifier that never subscribed.
    NotASubscriber { queue: String, subscriber: String },
    /// Two queue specs in the startup config share a name.
    DuplicateQueueName { queue: String },
}

impl std::error::Error for QueueError {}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::NotFound { queue } => write!(f, "queue {queue} not found"),
            QueueError::AlreadySubscribed { queue, subscriber } => {
                write!(f, "subscriber {subscriber} has already subscribed to queue {queue}")
            }
            QueueError::SubscriberCapacityExceeded { queue, max } => write!(
                f,
                "too many subscribers: max amount of subscribers for queue {queue} is {max}"
            ),
            QueueError::MessageCapacityExceeded { queue, max } => write!(
                f,
                "too many messages: max amount of messages for queue {queue} is {max}"
            ),
            QueueError::NotASubscriber { queue, subscriber } => {
                write!(f, "queue {queue} doesn't have subscriber {subscriber}")
            }
            QueueError::DuplicateQueueName { queue } => {
                write!(f, "queue with name {queue} already exists")
            }
        }
    }
}
