//! Core queue logic: entities, registry, service rules and the error
//! taxonomy they share.
//!
//! Everything in here is transport-agnostic. The HTTP adapter in
//! `crate::api` maps these operations and errors onto routes and status
//! codes but adds no rules of its own.

pub mod error;
pub mod message;
pub mod queue;
pub mod registry;
pub mod service;

pub use error::QueueError;
pub use queue::{Queue, QueueSnapshot};
pub use registry::QueueRegistry;
pub use service::QueueService;
