use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Direction, OrderStatus};
use crate::values::{InstrumentId, Price, Volume};

/// Order as reported back by the trading front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    /// Client-side order reference, unique within a session
    pub order_ref: String,
    /// Exchange-assigned order id (empty until the exchange accepts)
    pub order_sys_id: String,
    pub order_local_id: String,
    pub direction: Direction,
    pub price: Price,
    pub volume: Volume,
    pub volume_traded: Volume,
    pub status: OrderStatus,
    pub status_message: String,
    /// Insert date, `YYYYMMDD`
    pub insert_date: String,
    /// Insert time, `HH:MM:SS`
    pub insert_time: String,
    pub sequence_no: i32,
}

impl OrderInfo {
    /// Remaining volume still working
    pub fn volume_remaining(&self) -> Volume {
        self.volume - self.volume_traded
    }

    /// Notional value of the original order
    pub fn notional(&self) -> Decimal {
        self.price * Decimal::from(self.volume)
    }
}
