//! Simulator configuration

use crate::error::{Result, SimError};
use crate::infrastructure::SimClock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Investor account known to the front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimAccount {
    pub investor_id: String,
    pub password: String,
    pub balance: Decimal,
}

/// Tradable instrument and the price market orders fill at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimInstrument {
    pub instrument_id: String,
    pub exchange_id: String,
    pub last_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// `YYYYMMDD`
    #[serde(default = "default_trading_day")]
    pub trading_day: String,

    #[serde(default = "default_front_id")]
    pub front_id: i32,

    #[serde(default = "default_session_id")]
    pub session_id: i32,

    #[serde(default = "default_accounts")]
    pub accounts: Vec<SimAccount>,

    #[serde(default = "default_instruments")]
    pub instruments: Vec<SimInstrument>,
}

fn default_trading_day() -> String {
    "20240102".to_string()
}

fn default_front_id() -> i32 {
    1
}

fn default_session_id() -> i32 {
    1
}

fn default_accounts() -> Vec<SimAccount> {
    vec![SimAccount {
        investor_id: "000001".to_string(),
        password: "123456".to_string(),
        balance: Decimal::from(1_000_000),
    }]
}

fn default_instruments() -> Vec<SimInstrument> {
    vec![
        SimInstrument {
            instrument_id: "rb2410".to_string(),
            exchange_id: "SHFE".to_string(),
            last_price: Decimal::from(3650),
        },
        SimInstrument {
            instrument_id: "IF2409".to_string(),
            exchange_id: "CFFEX".to_string(),
            last_price: Decimal::from(3400),
        },
    ]
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trading_day: default_trading_day(),
            front_id: default_front_id(),
            session_id: default_session_id(),
            accounts: default_accounts(),
            instruments: default_instruments(),
        }
    }
}

impl SimConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SimError::Config(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        SimClock::new(&self.trading_day)?;
        if self.instruments.is_empty() {
            return Err(SimError::Config("no instruments configured".to_string()));
        }
        Ok(())
    }

    pub fn account(&self, investor_id: &str) -> Option<&SimAccount> {
        self.accounts.iter().find(|a| a.investor_id == investor_id)
    }

    pub fn instrument(&self, instrument_id: &str) -> Option<&SimInstrument> {
        self.instruments
            .iter()
            .find(|i| i.instrument_id == instrument_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config.trading_day, "20240102");
        assert!(config.account("000001").is_some());
        assert_eq!(config.instrument("rb2410").unwrap().exchange_id, "SHFE");
        assert!(config.instrument("zz9999").is_none());
    }

    #[test]
    fn test_invalid_trading_day() {
        let err = SimConfig::from_json(r#"{"trading_day": "2024-01-02"}"#).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_requires_instruments() {
        let err = SimConfig::from_json(r#"{"instruments": []}"#).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
