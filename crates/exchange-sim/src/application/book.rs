//! In-memory trading state of the simulated front

use crate::error::{Result, SimError};
use crate::model::SimInstrument;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tradewire_core::{
    Direction, HedgeFlag, OffsetFlag, OrderInfo, OrderStatus, ParkedCancelOrderInfo,
    ParkedOrderInfo, PositionDate, PositionDirection, PositionInfo, Price, PriceSource, TradeInfo,
    TradeType, Volume,
};

/// Orders, trades, positions and parked requests for every investor
#[derive(Debug, Default)]
pub struct Ledger {
    orders: Vec<OrderInfo>,
    /// (front_id, session_id) of the session that placed each order
    order_sessions: Vec<(i32, i32)>,
    trades: Vec<TradeInfo>,
    positions: BTreeMap<(String, String, PositionDirection), PositionInfo>,
    parked_orders: Vec<ParkedOrderInfo>,
    parked_actions: Vec<ParkedCancelOrderInfo>,
    sequence: i32,
}

/// New order as decoded from a native insert request
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub broker_id: String,
    pub investor_id: String,
    pub order_ref: String,
    pub direction: Direction,
    pub offset_flag: OffsetFlag,
    pub hedge_flag: HedgeFlag,
    pub is_market: bool,
    pub price: Price,
    pub volume: Volume,
}

/// Stamps for records created by one request
#[derive(Debug, Clone)]
pub struct Stamp {
    pub front_id: i32,
    pub session_id: i32,
    pub date: String,
    pub time: String,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_sequence(&mut self) -> i32 {
        self.sequence += 1;
        self.sequence
    }

    /// Highest numeric order ref used by a session, as a string
    pub fn max_order_ref(&self, front_id: i32, session_id: i32) -> String {
        self.orders
            .iter()
            .zip(&self.order_sessions)
            .filter(|(_, s)| **s == (front_id, session_id))
            .filter_map(|(o, _)| o.order_ref.trim().parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            .to_string()
    }

    /// Accept an order; market orders fill in full at the last price
    pub fn insert_order(
        &mut self,
        instrument: &SimInstrument,
        order: NewOrder,
        stamp: &Stamp,
    ) -> Result<(OrderInfo, Option<TradeInfo>)> {
        if order.volume <= 0 {
            return Err(SimError::InvalidOrder(format!(
                "volume must be positive, got {}",
                order.volume
            )));
        }
        if !order.is_market && order.price <= Decimal::ZERO {
            return Err(SimError::InvalidOrder(format!(
                "limit price must be positive, got {}",
                order.price
            )));
        }
        let duplicate = self
            .orders
            .iter()
            .zip(&self.order_sessions)
            .any(|(o, s)| {
                o.order_ref == order.order_ref && *s == (stamp.front_id, stamp.session_id)
            });
        if duplicate {
            return Err(SimError::DuplicateOrder(order.order_ref));
        }

        let sequence_no = self.next_sequence();
        let order_sys_id = format!("{:>12}", sequence_no);
        let price = if order.is_market {
            instrument.last_price
        } else {
            order.price
        };

        let mut info = OrderInfo {
            investor_id: order.investor_id.clone(),
            instrument_id: instrument.instrument_id.clone(),
            exchange_id: instrument.exchange_id.clone(),
            order_ref: order.order_ref.clone(),
            order_sys_id,
            order_local_id: format!("{:>12}", sequence_no),
            direction: order.direction,
            price,
            volume: order.volume,
            volume_traded: 0,
            status: OrderStatus::NoTradeQueueing,
            status_message: "queued".to_string(),
            insert_date: stamp.date.clone(),
            insert_time: stamp.time.clone(),
            sequence_no,
        };

        let trade = if order.is_market {
            info.volume_traded = order.volume;
            info.status = OrderStatus::AllTraded;
            info.status_message = "all traded".to_string();

            let trade = TradeInfo {
                investor_id: order.investor_id.clone(),
                instrument_id: instrument.instrument_id.clone(),
                exchange_id: instrument.exchange_id.clone(),
                order_ref: order.order_ref.clone(),
                order_sys_id: info.order_sys_id.clone(),
                order_local_id: info.order_local_id.clone(),
                trade_id: format!("{:>20}", self.trades.len() + 1),
                price,
                volume: order.volume,
                trade_date: stamp.date.clone(),
                trade_time: stamp.time.clone(),
                sequence_no,
                direction: order.direction,
                offset_flag: order.offset_flag,
                hedge_flag: order.hedge_flag,
                trade_type: TradeType::Common,
                price_source: PriceSource::LastPrice,
            };
            self.apply_trade(&order.broker_id, &trade);
            self.trades.push(trade.clone());
            Some(trade)
        } else {
            None
        };

        self.orders.push(info.clone());
        self.order_sessions.push((stamp.front_id, stamp.session_id));
        Ok((info, trade))
    }

    /// Cancel a working order by exchange id, or by order ref within the
    /// placing session
    pub fn cancel_order(
        &mut self,
        investor_id: &str,
        order_sys_id: &str,
        order_ref: &str,
        session: (i32, i32),
    ) -> Result<OrderInfo> {
        let position = self
            .orders
            .iter()
            .zip(&self.order_sessions)
            .position(|(o, s)| {
                o.investor_id == investor_id
                    && if order_sys_id.trim().is_empty() {
                        o.order_ref == order_ref && *s == session
                    } else {
                        o.order_sys_id.trim() == order_sys_id.trim()
                    }
            });

        let Some(index) = position else {
            let key = if order_sys_id.trim().is_empty() {
                order_ref
            } else {
                order_sys_id
            };
            return Err(SimError::OrderNotFound(key.trim().to_string()));
        };

        let order = &mut self.orders[index];
        if order.status.is_terminal() {
            return Err(SimError::OrderClosed(order.order_sys_id.trim().to_string()));
        }
        order.status = OrderStatus::Canceled;
        order.status_message = "cancelled".to_string();
        Ok(order.clone())
    }

    pub fn park_order(&mut self, mut order: ParkedOrderInfo) -> ParkedOrderInfo {
        if order.parked_order_id.is_empty() {
            order.parked_order_id = format!("{:>12}", self.parked_orders.len() + 1);
        }
        self.parked_orders.push(order.clone());
        order
    }

    pub fn park_action(&mut self, mut action: ParkedCancelOrderInfo) -> ParkedCancelOrderInfo {
        if action.parked_order_action_id.is_empty() {
            action.parked_order_action_id = format!("{:>12}", self.parked_actions.len() + 1);
        }
        self.parked_actions.push(action.clone());
        action
    }

    pub fn orders(&self, investor_id: &str) -> Vec<OrderInfo> {
        self.orders
            .iter()
            .filter(|o| o.investor_id == investor_id)
            .cloned()
            .collect()
    }

    pub fn trades(&self, investor_id: &str) -> Vec<TradeInfo> {
        self.trades
            .iter()
            .filter(|t| t.investor_id == investor_id)
            .cloned()
            .collect()
    }

    pub fn positions(&self, investor_id: &str) -> Vec<PositionInfo> {
        self.positions
            .values()
            .filter(|p| p.investor_id == investor_id)
            .cloned()
            .collect()
    }

    pub fn parked_orders(&self, investor_id: &str) -> Vec<ParkedOrderInfo> {
        self.parked_orders
            .iter()
            .filter(|p| p.investor_id == investor_id)
            .cloned()
            .collect()
    }

    pub fn parked_actions(&self, investor_id: &str) -> Vec<ParkedCancelOrderInfo> {
        self.parked_actions
            .iter()
            .filter(|p| p.investor_id == investor_id)
            .cloned()
            .collect()
    }

    /// Opening trades add to the position on their side; closing trades
    /// reduce the opposite side
    fn apply_trade(&mut self, broker_id: &str, trade: &TradeInfo) {
        let opening = trade.offset_flag.is_open();
        let side = match (trade.direction, opening) {
            (Direction::Buy, true) | (Direction::Sell, false) => PositionDirection::Long,
            (Direction::Sell, true) | (Direction::Buy, false) => PositionDirection::Short,
        };
        let amount = trade.notional();

        let key = (
            trade.investor_id.clone(),
            trade.instrument_id.clone(),
            side,
        );
        let position = self.positions.entry(key).or_insert_with(|| PositionInfo {
            broker_id: broker_id.to_string(),
            investor_id: trade.investor_id.clone(),
            instrument_id: trade.instrument_id.clone(),
            direction: side,
            hedge_flag: trade.hedge_flag,
            position_date: PositionDate::Today,
            yd_position: 0,
            position: 0,
            long_frozen: 0,
            short_frozen: 0,
            open_volume: 0,
            close_volume: 0,
            open_amount: Decimal::ZERO,
            close_amount: Decimal::ZERO,
            position_cost: Decimal::ZERO,
            commission: Decimal::ZERO,
            position_profit: Decimal::ZERO,
        });

        if opening {
            position.position += trade.volume;
            position.open_volume += trade.volume;
            position.open_amount += amount;
            position.position_cost += amount;
        } else {
            position.position = (position.position - trade.volume).max(0);
            position.close_volume += trade.volume;
            position.close_amount += amount;
        }
    }
}
