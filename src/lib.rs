//! broadq – an in-memory, broadcast-style message queue served over HTTP.
//!
//! This crate exports
//!  * `core`   – queue entities, registry, service rules and errors
//!  * `api`    – HTTP transport adapter (axum)
//!  * `config` – TOML-driven runtime configuration
//!
//! Queues are declared once in the config file and live for the whole
//! process. Publishers post JSON bodies; every subscriber of a queue
//! receives every message published after it joined, exactly once.
//! Downstream applications can embed the server (`start_server`) or build
//! their own binaries on top of the library.

// ───────────────────────────────────────────────────────────
// Public modules
// ───────────────────────────────────────────────────────────
pub mod api;
pub mod config;
pub mod core;
pub mod logging;

// ───────────────────────────────────────────────────────────
// Re-exports
// ───────────────────────────────────────────────────────────
pub use api::server::serve as start_server;
pub use config::{load_config, Config};
