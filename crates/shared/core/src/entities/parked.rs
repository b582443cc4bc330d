use serde::{Deserialize, Serialize};

use super::{Direction, HedgeFlag, OffsetFlag, OrderPriceType, ParkedOrderStatus};
use crate::values::{InstrumentId, Price, Volume};

/// Order parked at the front until the next trading section opens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkedOrderInfo {
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub order_ref: String,
    pub parked_order_id: String,
    pub price: Price,
    pub volume: Volume,
    pub direction: Direction,
    pub offset_flag: OffsetFlag,
    pub hedge_flag: HedgeFlag,
    pub price_type: OrderPriceType,
    pub status: ParkedOrderStatus,
}

/// Cancel action parked at the front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkedCancelOrderInfo {
    pub investor_id: String,
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub order_ref: String,
    pub order_action_ref: i32,
    pub order_sys_id: String,
    pub parked_order_action_id: String,
    pub status: ParkedOrderStatus,
}
