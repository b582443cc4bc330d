use crate::error::{Result, SimError};
use chrono::{Local, NaiveDate};

const TRADING_DAY_FORMAT: &str = "%Y%m%d";

/// Trading day and wall-clock stamps for simulated records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimClock {
    trading_day: NaiveDate,
}

impl SimClock {
    /// Parse a `YYYYMMDD` trading day
    pub fn new(trading_day: &str) -> Result<Self> {
        let trading_day = NaiveDate::parse_from_str(trading_day, TRADING_DAY_FORMAT)
            .map_err(|e| SimError::Config(format!("trading day '{}': {}", trading_day, e)))?;
        Ok(Self { trading_day })
    }

    pub fn trading_day(&self) -> String {
        self.trading_day.format(TRADING_DAY_FORMAT).to_string()
    }

    /// Calendar date of the event, `YYYYMMDD`
    pub fn date(&self) -> String {
        Local::now().format(TRADING_DAY_FORMAT).to_string()
    }

    /// Time of day, `HH:MM:SS`
    pub fn time(&self) -> String {
        Local::now().format("%H:%M:%S").to_string()
    }
}
