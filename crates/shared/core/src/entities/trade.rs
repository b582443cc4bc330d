use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Direction, HedgeFlag, OffsetFlag};
use crate::values::{InstrumentId, Price, Volume};

/// Origin of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    Common,
    OptionsExecution,
    OTC,
    EFPDerived,
    CombinationDerived,
}

/// Which price the trade executed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceSource {
    LastPrice,
    Buy,
    Sell,
}

/// A fill reported by the trading front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub order_ref: String,
    pub order_sys_id: String,
    pub order_local_id: String,
    pub trade_id: String,
    pub price: Price,
    pub volume: Volume,
    /// Trade date, `YYYYMMDD`
    pub trade_date: String,
    /// Trade time, `HH:MM:SS`
    pub trade_time: String,
    pub sequence_no: i32,
    pub direction: Direction,
    pub offset_flag: OffsetFlag,
    pub hedge_flag: HedgeFlag,
    pub trade_type: TradeType,
    pub price_source: PriceSource,
}

impl TradeInfo {
    /// Returns the notional value of the trade (price * volume)
    pub fn notional(&self) -> Decimal {
        self.price * Decimal::from(self.volume)
    }
}
