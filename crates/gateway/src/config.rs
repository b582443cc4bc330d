//! Gateway configuration
//!
//! Loaded from JSON:
//!
//! ```json
//! {
//!   "broker_id": "9999",
//!   "front_address": "tcp://180.168.146.187:10130",
//!   "investor_id": "000001",
//!   "password": "secret"
//! }
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection and credential settings for one trade session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Broker code
    #[serde(default)]
    pub broker_id: String,

    /// Front address, `tcp://IP:Port`
    #[serde(default = "default_front_address")]
    pub front_address: String,

    /// Investor account used for login
    #[serde(default)]
    pub investor_id: String,

    #[serde(default)]
    pub password: String,

    /// Capacity of the session lifecycle broadcast channel
    #[serde(default = "default_session_event_capacity")]
    pub session_event_capacity: usize,
}

fn default_front_address() -> String {
    "tcp://127.0.0.1:41205".to_string()
}

fn default_session_event_capacity() -> usize {
    64
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            broker_id: String::new(),
            front_address: default_front_address(),
            investor_id: String::new(),
            password: String::new(),
            session_event_capacity: default_session_event_capacity(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.front_address.starts_with("tcp://") || self.front_address.starts_with("ssl://"))
        {
            return Err(ConfigError::Invalid(format!(
                "front_address must be tcp:// or ssl://, got {}",
                self.front_address
            )));
        }
        if self.session_event_capacity == 0 {
            return Err(ConfigError::Invalid(
                "session_event_capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
