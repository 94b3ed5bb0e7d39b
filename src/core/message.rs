use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

/// Alias for a queue name.
pub type QueueName = String;
/// Alias for a subscriber identifier. Opaque, supplied by the caller.
pub type SubscriberId = String;
/// Alias for a message identifier, unique within its queue.
pub type MessageId = String;

/// A single stored message: the payload as published, plus the set of
/// subscribers that have already retrieved it.
///
/// `seen_by` only ever grows; once it covers the queue's full subscriber
/// set the message is garbage-collected (see [`super::Queue`]).
#[derive(Debug, Clone)]
pub struct QueueMessage {
    pub body: Value,
    pub seen_by: HashSet<SubscriberId>,
}

impl QueueMessage {
    pub fn new(body: Value) -> Self {
        Self {
            body,
            seen_by: HashSet::new(),
        }
    }
}

/// Generates a fresh message id. Ids are never reused.
pub fn generate_message_id() -> MessageId {
    Uuid::new_v4().to_string()
}
