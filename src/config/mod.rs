use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub request_timeout_ms: u64,
}

/// Static declaration of a single queue. The full set of queues is fixed
/// at startup; there is no way to add or remove queues at runtime.
#[derive(Debug, Deserialize, Clone)]
pub struct QueueSpec {
    pub name: String,
    pub max_length: usize,
    pub max_subscribers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub queues: Vec<QueueSpec>,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, anyhow::Error> {
    let raw: String = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)?;
    Ok(config)
}
