use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::HedgeFlag;
use crate::values::{InstrumentId, Volume};

/// Direction of a held position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PositionDirection {
    Net,
    Long,
    Short,
}

/// Whether a position row covers today's or historical opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionDate {
    Today,
    History,
}

/// One position row as reported by the trading front
///
/// Monetary fields are reported values; nothing here is computed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionInfo {
    pub broker_id: String,
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub direction: PositionDirection,
    pub hedge_flag: HedgeFlag,
    pub position_date: PositionDate,
    /// Yesterday's closing position
    pub yd_position: Volume,
    pub position: Volume,
    pub long_frozen: Volume,
    pub short_frozen: Volume,
    pub open_volume: Volume,
    pub close_volume: Volume,
    pub open_amount: Decimal,
    pub close_amount: Decimal,
    pub position_cost: Decimal,
    pub commission: Decimal,
    pub position_profit: Decimal,
}

impl PositionInfo {
    /// Returns true when no volume is held
    pub fn is_flat(&self) -> bool {
        self.position == 0
    }
}
