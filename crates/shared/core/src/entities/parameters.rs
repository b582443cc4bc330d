//! Request parameters for order entry and cancellation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    ActionFlag, ContingentCondition, Direction, ForceCloseReason, HedgeFlag, OffsetFlag,
    OrderPriceType, ParkedOrderStatus, TimeCondition, VolumeCondition,
};
use crate::values::{InstrumentId, Price, Volume};

/// Order entry parameters, shared by normal and parked orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderParameter {
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    /// Client-side order reference; empty lets the front assign one
    pub order_ref: String,
    pub direction: Direction,
    pub offset_flag: OffsetFlag,
    pub hedge_flag: HedgeFlag,
    pub price_type: OrderPriceType,
    pub price: Price,
    pub stop_price: Price,
    pub volume: Volume,
    pub min_volume: Volume,
    pub time_condition: TimeCondition,
    pub volume_condition: VolumeCondition,
    pub contingent_condition: ContingentCondition,
    pub force_close_reason: ForceCloseReason,
    /// Expiry date for GTD orders, `YYYYMMDD`
    pub gtd_date: String,
    pub is_auto_suspend: bool,
    pub user_force_close: bool,
    /// Only meaningful for parked orders
    pub parked_order_id: String,
}

impl OrderParameter {
    /// Create a good-for-day speculative limit order
    pub fn limit(
        instrument_id: impl Into<InstrumentId>,
        exchange_id: impl Into<String>,
        direction: Direction,
        offset_flag: OffsetFlag,
        price: Price,
        volume: Volume,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            exchange_id: exchange_id.into(),
            order_ref: String::new(),
            direction,
            offset_flag,
            hedge_flag: HedgeFlag::Speculation,
            price_type: OrderPriceType::LimitPrice,
            price,
            stop_price: Decimal::ZERO,
            volume,
            min_volume: 1,
            time_condition: TimeCondition::GFD,
            volume_condition: VolumeCondition::AV,
            contingent_condition: ContingentCondition::Immediately,
            force_close_reason: ForceCloseReason::NotForceClose,
            gtd_date: String::new(),
            is_auto_suspend: false,
            user_force_close: false,
            parked_order_id: String::new(),
        }
    }

    /// Create a speculative market order
    pub fn market(
        instrument_id: impl Into<InstrumentId>,
        exchange_id: impl Into<String>,
        direction: Direction,
        offset_flag: OffsetFlag,
        volume: Volume,
    ) -> Self {
        Self {
            price_type: OrderPriceType::AnyPrice,
            price: Decimal::ZERO,
            // Market orders are always IOC
            time_condition: TimeCondition::IOC,
            ..Self::limit(
                instrument_id,
                exchange_id,
                direction,
                offset_flag,
                Decimal::ZERO,
                volume,
            )
        }
    }

    /// Set the client order reference
    pub fn with_order_ref(mut self, order_ref: impl Into<String>) -> Self {
        self.order_ref = order_ref.into();
        self
    }

    /// Set the hedge flag
    pub fn with_hedge_flag(mut self, hedge_flag: HedgeFlag) -> Self {
        self.hedge_flag = hedge_flag;
        self
    }

    /// Set the validity window
    pub fn with_time_condition(mut self, time_condition: TimeCondition) -> Self {
        self.time_condition = time_condition;
        self
    }

    /// Turn this into a parked order triggered at the next section open
    pub fn parked(mut self, parked_order_id: impl Into<String>) -> Self {
        self.parked_order_id = parked_order_id.into();
        self.contingent_condition = ContingentCondition::ParkedOrder;
        self
    }
}

/// Cancel parameters, shared by normal and parked cancel actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderParameter {
    pub instrument_id: InstrumentId,
    pub exchange_id: String,
    pub order_action_ref: i32,
    pub order_ref: String,
    pub order_sys_id: String,
    pub price: Price,
    pub volume_change: Volume,
    pub action_flag: ActionFlag,
    /// Only meaningful for parked cancel actions
    pub parked_order_action_id: String,
    pub status: ParkedOrderStatus,
}

impl CancelOrderParameter {
    /// Cancel by exchange-assigned order id
    pub fn by_sys_id(
        instrument_id: impl Into<InstrumentId>,
        exchange_id: impl Into<String>,
        order_sys_id: impl Into<String>,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            exchange_id: exchange_id.into(),
            order_action_ref: 0,
            order_ref: String::new(),
            order_sys_id: order_sys_id.into(),
            price: Decimal::ZERO,
            volume_change: 0,
            action_flag: ActionFlag::Delete,
            parked_order_action_id: String::new(),
            status: ParkedOrderStatus::NotSend,
        }
    }

    /// Cancel by client order reference (requires the session's front/session id)
    pub fn by_order_ref(
        instrument_id: impl Into<InstrumentId>,
        exchange_id: impl Into<String>,
        order_ref: impl Into<String>,
    ) -> Self {
        Self {
            order_ref: order_ref.into(),
            ..Self::by_sys_id(instrument_id, exchange_id, String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limit_order_parameter() {
        let order = OrderParameter::limit(
            "rb2410",
            "SHFE",
            Direction::Buy,
            OffsetFlag::Open,
            dec!(3650),
            2,
        );

        assert_eq!(order.instrument_id, "rb2410");
        assert_eq!(order.price_type, OrderPriceType::LimitPrice);
        assert_eq!(order.price, dec!(3650));
        assert_eq!(order.time_condition, TimeCondition::GFD);
        assert!(order.order_ref.is_empty());
    }

    #[test]
    fn test_market_order_parameter() {
        let order = OrderParameter::market("IF2409", "CFFEX", Direction::Sell, OffsetFlag::Open, 1)
            .with_order_ref("7");

        assert_eq!(order.price_type, OrderPriceType::AnyPrice);
        assert_eq!(order.price, Decimal::ZERO);
        assert_eq!(order.time_condition, TimeCondition::IOC);
        assert_eq!(order.order_ref, "7");
    }

    #[test]
    fn test_parked_order_parameter() {
        let order = OrderParameter::limit(
            "rb2410",
            "SHFE",
            Direction::Buy,
            OffsetFlag::Open,
            dec!(3600),
            1,
        )
        .parked("P1");

        assert_eq!(order.parked_order_id, "P1");
        assert_eq!(order.contingent_condition, ContingentCondition::ParkedOrder);
    }

    #[test]
    fn test_cancel_by_order_ref() {
        let cancel = CancelOrderParameter::by_order_ref("rb2410", "SHFE", "12");
        assert_eq!(cancel.order_ref, "12");
        assert!(cancel.order_sys_id.is_empty());
        assert_eq!(cancel.action_flag, ActionFlag::Delete);
    }
}
