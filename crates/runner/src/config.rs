//! Runner configuration
//!
//! One JSON file carries the gateway settings, the simulated front and the
//! demo script:
//!
//! ```json
//! {
//!   "gateway": { "broker_id": "9999", "investor_id": "000001", "password": "123456" },
//!   "simulator": { "trading_day": "20240102" },
//!   "script": { "instrument_id": "rb2410", "orders": 3, "shuffle_delivery": true }
//! }
//! ```

use crate::error::Result;
use exchange_sim::SimConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tradewire_gateway::{ConfigError, GatewayConfig};

/// Scripted trading session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptConfig {
    #[serde(default = "default_instrument_id")]
    pub instrument_id: String,

    #[serde(default = "default_exchange_id")]
    pub exchange_id: String,

    /// Resting limit orders to place below `price`
    #[serde(default = "default_orders")]
    pub orders: u32,

    #[serde(default = "default_price")]
    pub price: Decimal,

    #[serde(default = "default_tick")]
    pub tick: Decimal,

    #[serde(default = "default_volume")]
    pub volume: i32,

    /// Hold query replies and release them interleaved at random
    #[serde(default)]
    pub shuffle_delivery: bool,

    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,
}

fn default_instrument_id() -> String {
    "rb2410".to_string()
}

fn default_exchange_id() -> String {
    "SHFE".to_string()
}

fn default_orders() -> u32 {
    3
}

fn default_price() -> Decimal {
    Decimal::from(3600)
}

fn default_tick() -> Decimal {
    Decimal::ONE
}

fn default_volume() -> i32 {
    1
}

fn default_call_timeout_ms() -> u64 {
    2000
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            instrument_id: default_instrument_id(),
            exchange_id: default_exchange_id(),
            orders: default_orders(),
            price: default_price(),
            tick: default_tick(),
            volume: default_volume(),
            shuffle_delivery: false,
            call_timeout_ms: default_call_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "default_gateway")]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub simulator: SimConfig,

    #[serde(default)]
    pub script: ScriptConfig,
}

/// Gateway settings matching the simulator's default account
fn default_gateway() -> GatewayConfig {
    GatewayConfig {
        broker_id: "9999".to_string(),
        investor_id: "000001".to_string(),
        password: "123456".to_string(),
        ..GatewayConfig::default()
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            gateway: default_gateway(),
            simulator: SimConfig::default(),
            script: ScriptConfig::default(),
        }
    }
}

impl RunnerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.gateway.validate()?;
        config.simulator.validate()?;
        if config.script.volume <= 0 {
            return Err(ConfigError::Invalid("script.volume must be positive".to_string()).into());
        }
        Ok(config)
    }
}
