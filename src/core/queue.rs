use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::QueueSpec;
use crate::core::error::QueueError;
use crate::core::message::{generate_message_id, MessageId, QueueMessage, QueueName, SubscriberId};

/// A named, capacity-bounded broadcast message store with its own
/// subscriber set.
///
/// Every mutation of `subscribers` or `messages` happens under the single
/// per-queue mutex, so the check-then-act sequences below (capacity check
/// + insert, membership check + read-mark-delete) are each one atomic
/// unit relative to concurrent calls on the same queue. Operations on
/// different queues never contend.
#[derive(Debug)]
pub struct Queue {
    name: QueueName,
    max_length: usize,
    max_subscribers: usize,
    state: Mutex<QueueState>,
}

#[derive(Debug, Default)]
struct QueueState {
    subscribers: HashSet<SubscriberId>,
    messages: HashMap<MessageId, QueueMessage>,
}

/// A consistent point-in-time copy of a queue, safe to hand to callers
/// without racing against subsequent mutation. Sets are sorted so the
/// serialized form is stable.
#[derive(Debug, Clone, Serialize)]
pub struct QueueSnapshot {
    pub name: QueueName,
    pub max_length: usize,
    pub max_subscribers: usize,
    pub subscribers: BTreeSet<SubscriberId>,
    pub messages: HashMap<MessageId, MessageSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageSnapshot {
    pub body: Value,
    pub seen_by: BTreeSet<SubscriberId>,
}

impl Queue {
    pub fn new(spec: &QueueSpec) -> Self {
        Self {
            name: spec.name.clone(),
            max_length: spec.max_length,
            max_subscribers: spec.max_subscribers,
            state: Mutex::new(QueueState {
                subscribers: HashSet::with_capacity(spec.max_subscribers),
                messages: HashMap::with_capacity(spec.max_length),
            }),
        }
    }

    pub fn name(&self) -> &QueueName {
        &self.name
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn max_subscribers(&self) -> usize {
        self.max_subscribers
    }

    /// Copies the current state into a [`QueueSnapshot`].
    pub async fn snapshot(&self) -> QueueSnapshot {
        let state = self.state.lock().await;
        QueueSnapshot {
            name: self.name.clone(),
            max_length: self.max_length,
            max_subscribers: self.max_subscribers,
            subscribers: state.subscribers.iter().cloned().collect(),
            messages: state
                .messages
                .iter()
                .map(|(id, msg)| {
                    (
                        id.clone(),
                        MessageSnapshot {
                            body: msg.body.clone(),
                            seen_by: msg.seen_by.iter().cloned().collect(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Adds a subscriber, rejecting duplicates and enforcing
    /// `max_subscribers`. Membership is permanent: there is no
    /// unsubscribe.
    pub async fn add_subscriber(&self, subscriber: &str) -> Result<(), QueueError> {
        let mut state = self.state.lock().await;

        if state.subscribers.contains(subscriber) {
            return Err(QueueError::AlreadySubscribed {
                queue: self.name.clone(),
                subscriber: subscriber.to_string(),
            });
        }
        if state.subscribers.len() == self.max_subscribers {
            return Err(QueueError::SubscriberCapacityExceeded {
                queue: self.name.clone(),
                max: self.max_subscribers,
            });
        }

        state.subscribers.insert(subscriber.to_string());
        debug!(queue = %self.name, %subscriber, "subscriber added");
        Ok(())
    }

    /// Stores a message under a fresh id, enforcing `max_length`.
    /// Messages are rejected once at capacity, never evicted to make
    /// room; capacity frees up only through garbage collection in
    /// [`Queue::consume`].
    pub async fn add_message(&self, body: Value) -> Result<MessageId, QueueError> {
        let mut state = self.state.lock().await;

        if state.messages.len() == self.max_length {
            return Err(QueueError::MessageCapacityExceeded {
                queue: self.name.clone(),
                max: self.max_length,
            });
        }

        let id = generate_message_id();
        state.messages.insert(id.clone(), QueueMessage::new(body));
        debug!(queue = %self.name, message_id = %id, "message stored");
        Ok(id)
    }

    /// Returns every message the subscriber has not yet seen, then marks
    /// the subscriber into `seen_by` of every stored message and deletes
    /// the ones now seen by the full subscriber set.
    ///
    /// The whole read-mark-delete sequence runs under the queue lock, so
    /// a message can never be collected while a concurrent publish or
    /// consume on the same queue is mid-flight.
    pub async fn consume(&self, subscriber: &str) -> Result<HashMap<MessageId, Value>, QueueError> {
        let mut state = self.state.lock().await;

        if !state.subscribers.contains(subscriber) {
            return Err(QueueError::NotASubscriber {
                queue: self.name.clone(),
                subscriber: subscriber.to_string(),
            });
        }

        let QueueState {
            subscribers,
            messages,
        } = &mut *state;

        let mut unseen = HashMap::new();
        for (id, msg) in messages.iter_mut() {
            // `insert` returning true means this subscriber had not seen
            // the message yet, so it belongs in the returned batch.
            if msg.seen_by.insert(subscriber.to_string()) {
                unseen.insert(id.clone(), msg.body.clone());
            }
        }

        let before = messages.len();
        messages.retain(|_, msg| msg.seen_by != *subscribers);
        let collected = before - messages.len();
        if collected > 0 {
            debug!(queue = %self.name, collected, "garbage-collected fully seen messages");
        }

        Ok(unseen)
    }
}
