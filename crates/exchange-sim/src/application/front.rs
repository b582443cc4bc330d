//! Simulated native trading front
//!
//! Answers every request synchronously onto the event sink. Protocol
//! failures become native error info on the reply; malformed requests and
//! requests sent while disconnected are refused with a [`SessionError`].

use super::book::{Ledger, NewOrder, Stamp};
use crate::error::{Result, SimError};
use crate::infrastructure::{DeliveryMode, EventSink, SimClock};
use crate::model::SimConfig;
use log::{debug, info, warn};
use parking_lot::{Mutex, MutexGuard};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::HashMap;
use tradewire_core::{
    AccountInfo, CorrelationToken, Direction, HedgeFlag, LoginInfo, OffsetFlag, OrderPriceType,
    ParkedCancelOrderInfo, ParkedOrderInfo, ParkedOrderStatus, Record,
};
use tradewire_ports::{
    DeliveryEvent, EventSender, InputOrderActionField, InputOrderField, LoginField, LogoutField,
    NativeCode, ParkedOrderActionField, ParkedOrderField, PasswordUpdateField, QueryField,
    RspInfo, SessionError, SessionEvent, SessionResult, TradeSession,
};

/// Disconnect reason reported for a requested disconnect
pub const REASON_REQUESTED: i32 = 0;

struct FrontState {
    connected: bool,
    broker_id: String,
    investor_id: Option<String>,
    passwords: HashMap<String, String>,
    ledger: Ledger,
}

impl FrontState {
    /// Logged-in investor, which must match the one named in the request
    fn investor(&self, requested: &str) -> Result<String> {
        match &self.investor_id {
            Some(investor) if requested.is_empty() || requested == investor => {
                Ok(investor.clone())
            }
            _ => Err(SimError::NotLoggedIn),
        }
    }
}

/// In-process trading front implementing [`TradeSession`]
pub struct SimFront {
    config: SimConfig,
    clock: SimClock,
    sink: EventSink,
    state: Mutex<FrontState>,
}

impl SimFront {
    pub fn new(config: SimConfig, tx: EventSender) -> Result<Self> {
        config.validate()?;
        let clock = SimClock::new(&config.trading_day)?;
        let passwords = config
            .accounts
            .iter()
            .map(|a| (a.investor_id.clone(), a.password.clone()))
            .collect();

        Ok(Self {
            config,
            clock,
            sink: EventSink::new(tx),
            state: Mutex::new(FrontState {
                connected: false,
                broker_id: String::new(),
                investor_id: None,
                passwords,
                ledger: Ledger::new(),
            }),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.state.lock().connected
    }

    pub fn set_delivery_mode(&self, mode: DeliveryMode) {
        self.sink.set_mode(mode);
    }

    /// Events queued while in [`DeliveryMode::Held`]
    pub fn held_events(&self) -> usize {
        self.sink.held()
    }

    pub fn release_in_order(&self) -> SessionResult<usize> {
        self.sink.release_in_order()
    }

    pub fn release_shuffled(&self) -> SessionResult<usize> {
        self.sink.release_shuffled(&mut rand::thread_rng())
    }

    pub fn release_shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> SessionResult<usize> {
        self.sink.release_shuffled(rng)
    }

    /// Push an arbitrary event, e.g. a stray reply for an unknown token
    pub fn inject(&self, event: DeliveryEvent) -> SessionResult<()> {
        self.sink.emit(event)
    }

    pub fn heartbeat_warning(&self, elapsed_secs: i32) -> SessionResult<()> {
        self.sink.emit(DeliveryEvent::Session(SessionEvent::HeartbeatWarning {
            elapsed_secs,
        }))
    }

    /// Drop the link without a disconnect request
    pub fn drop_connection(&self, reason: i32) -> SessionResult<()> {
        {
            let mut state = self.state.lock();
            state.connected = false;
            state.investor_id = None;
        }
        warn!("Simulated front dropped connection (reason {:#06x})", reason);
        self.sink
            .emit(DeliveryEvent::Session(SessionEvent::Disconnected { reason }))
    }

    fn online(&self) -> SessionResult<MutexGuard<'_, FrontState>> {
        let state = self.state.lock();
        if !state.connected {
            return Err(SessionError::NotConnected);
        }
        Ok(state)
    }

    fn stamp(&self) -> Stamp {
        Stamp {
            front_id: self.config.front_id,
            session_id: self.config.session_id,
            date: self.clock.date(),
            time: self.clock.time(),
        }
    }

    fn answer<T: Into<Record>>(
        &self,
        token: CorrelationToken,
        outcome: Result<T>,
    ) -> SessionResult<()> {
        match outcome {
            Ok(record) => self.sink.emit(DeliveryEvent::reply(token, record)),
            Err(e) => {
                debug!("Request {} failed: {}", token, e);
                self.sink.emit(DeliveryEvent::error(token, e.into()))
            }
        }
    }

    fn acknowledge(&self, token: CorrelationToken, outcome: Result<()>) -> SessionResult<()> {
        match outcome {
            Ok(()) => self.sink.emit(DeliveryEvent::ack(token)),
            Err(e) => {
                debug!("Request {} failed: {}", token, e);
                self.sink.emit(DeliveryEvent::error(token, e.into()))
            }
        }
    }

    /// One event per record, the last one flagged; an empty result is a
    /// single terminal event without a record
    fn stream<T: Into<Record>>(
        &self,
        token: CorrelationToken,
        outcome: Result<Vec<T>>,
    ) -> SessionResult<()> {
        let records = match outcome {
            Ok(records) => records,
            Err(e) => {
                debug!("Query {} failed: {}", token, e);
                return self.sink.emit(DeliveryEvent::error(token, e.into()));
            }
        };

        if records.is_empty() {
            return self.sink.emit(DeliveryEvent::end_of_stream(token));
        }

        let last = records.len() - 1;
        self.sink.emit_all(
            records
                .into_iter()
                .enumerate()
                .map(|(i, record)| DeliveryEvent::record(token, record, i == last)),
        )
    }

    fn account(&self, investor_id: &str) -> Result<AccountInfo> {
        let account = self
            .config
            .account(investor_id)
            .ok_or_else(|| SimError::InvalidLogin(investor_id.to_string()))?;

        Ok(AccountInfo {
            investor_id: investor_id.to_string(),
            trading_day: self.clock.trading_day(),
            deposit: Decimal::ZERO,
            withdraw: Decimal::ZERO,
            frozen_margin: Decimal::ZERO,
            frozen_cash: Decimal::ZERO,
            current_margin: Decimal::ZERO,
            cash_in: Decimal::ZERO,
            commission: Decimal::ZERO,
            close_profit: Decimal::ZERO,
            position_profit: Decimal::ZERO,
            balance: account.balance,
            available: account.balance,
            withdraw_quota: account.balance,
        })
    }
}

fn price(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

impl TradeSession for SimFront {
    fn connect(&self, broker_id: &str, front_address: &str) -> SessionResult<()> {
        {
            let mut state = self.state.lock();
            state.connected = true;
            state.broker_id = broker_id.to_string();
        }
        info!("Simulated front accepted connection to {}", front_address);
        self.sink.emit(DeliveryEvent::Session(SessionEvent::Connected))
    }

    fn disconnect(&self) -> SessionResult<()> {
        {
            let mut state = self.state.lock();
            state.connected = false;
            state.investor_id = None;
        }
        info!("Simulated front closed connection");
        self.sink.emit(DeliveryEvent::Session(SessionEvent::Disconnected {
            reason: REASON_REQUESTED,
        }))
    }

    fn trading_day(&self) -> String {
        self.clock.trading_day()
    }

    fn user_login(&self, token: CorrelationToken, req: &LoginField) -> SessionResult<()> {
        let outcome = {
            let mut state = self.online()?;
            match state.passwords.get(&req.user_id) {
                Some(password) if *password == req.password => {
                    state.investor_id = Some(req.user_id.clone());
                    Ok(LoginInfo {
                        investor_id: req.user_id.clone(),
                        trading_day: self.clock.trading_day(),
                        login_time: self.clock.time(),
                        front_id: self.config.front_id,
                        session_id: self.config.session_id,
                        max_order_ref: state
                            .ledger
                            .max_order_ref(self.config.front_id, self.config.session_id),
                    })
                }
                _ => Err(SimError::InvalidLogin(req.user_id.clone())),
            }
        };

        match outcome {
            Ok(login) => {
                info!("Investor {} logged in", login.investor_id);
                self.sink.emit(DeliveryEvent::reply(token, login))
            }
            // Login failures ride on the reply itself
            Err(e) => {
                warn!("Rejected login for {}", req.user_id);
                self.sink.emit(DeliveryEvent::UnaryReply {
                    token,
                    info: Some(RspInfo::from(e)),
                    record: None,
                })
            }
        }
    }

    fn user_logout(&self, token: CorrelationToken, req: &LogoutField) -> SessionResult<()> {
        let outcome = {
            let mut state = self.online()?;
            state.investor(&req.user_id).map(|_| {
                state.investor_id = None;
            })
        };
        self.acknowledge(token, outcome)
    }

    fn update_user_password(
        &self,
        token: CorrelationToken,
        req: &PasswordUpdateField,
    ) -> SessionResult<()> {
        let outcome = {
            let mut state = self.online()?;
            state.investor(&req.user_id).and_then(|investor| {
                match state.passwords.get_mut(&investor) {
                    Some(password) if *password == req.old_password => {
                        *password = req.new_password.clone();
                        Ok(())
                    }
                    _ => Err(SimError::PasswordMismatch),
                }
            })
        };
        self.acknowledge(token, outcome)
    }

    fn order_insert(&self, token: CorrelationToken, req: &InputOrderField) -> SessionResult<()> {
        let order = NewOrder {
            broker_id: req.broker_id.clone(),
            investor_id: req.investor_id.clone(),
            order_ref: req.order_ref.clone(),
            direction: Direction::from_code(req.direction)?,
            offset_flag: OffsetFlag::from_code(req.comb_offset_flag)?,
            hedge_flag: HedgeFlag::from_code(req.comb_hedge_flag)?,
            is_market: OrderPriceType::from_code(req.order_price_type)? == OrderPriceType::AnyPrice,
            price: price(req.limit_price),
            volume: req.volume_total_original,
        };
        let stamp = self.stamp();

        let outcome = {
            let mut state = self.online()?;
            state.investor(&req.investor_id).and_then(|_| {
                let instrument = self
                    .config
                    .instrument(&req.instrument_id)
                    .ok_or_else(|| SimError::InstrumentNotFound(req.instrument_id.clone()))?;
                state.ledger.insert_order(instrument, order, &stamp)
            })
        };

        if let Ok((order, trade)) = &outcome {
            debug!(
                "Order {} ref {} {:?}",
                order.order_sys_id.trim(),
                order.order_ref,
                order.status
            );
            if let Some(trade) = trade {
                info!(
                    "Filled {} {} @ {}",
                    trade.instrument_id, trade.volume, trade.price
                );
            }
        }
        self.answer(token, outcome.map(|(order, _)| order))
    }

    fn order_action(
        &self,
        token: CorrelationToken,
        req: &InputOrderActionField,
    ) -> SessionResult<()> {
        let outcome = {
            let mut state = self.online()?;
            state.investor(&req.investor_id).and_then(|investor| {
                state.ledger.cancel_order(
                    &investor,
                    &req.order_sys_id,
                    &req.order_ref,
                    (req.front_id, req.session_id),
                )
            })
        };
        self.answer(token, outcome)
    }

    fn parked_order_insert(
        &self,
        token: CorrelationToken,
        req: &ParkedOrderField,
    ) -> SessionResult<()> {
        let direction = Direction::from_code(req.direction)?;
        let offset_flag = OffsetFlag::from_code(req.comb_offset_flag)?;
        let hedge_flag = HedgeFlag::from_code(req.comb_hedge_flag)?;
        let price_type = OrderPriceType::from_code(req.order_price_type)?;

        let outcome = {
            let mut state = self.online()?;
            state.investor(&req.investor_id).and_then(|investor| {
                let instrument = self
                    .config
                    .instrument(&req.instrument_id)
                    .ok_or_else(|| SimError::InstrumentNotFound(req.instrument_id.clone()))?;
                Ok(state.ledger.park_order(ParkedOrderInfo {
                    investor_id: investor,
                    instrument_id: instrument.instrument_id.clone(),
                    exchange_id: instrument.exchange_id.clone(),
                    order_ref: req.order_ref.clone(),
                    parked_order_id: req.parked_order_id.clone(),
                    price: price(req.limit_price),
                    volume: req.volume_total_original,
                    direction,
                    offset_flag,
                    hedge_flag,
                    price_type,
                    status: ParkedOrderStatus::NotSend,
                }))
            })
        };
        self.answer(token, outcome)
    }

    fn parked_order_action(
        &self,
        token: CorrelationToken,
        req: &ParkedOrderActionField,
    ) -> SessionResult<()> {
        let outcome = {
            let mut state = self.online()?;
            state.investor(&req.investor_id).and_then(|investor| {
                let instrument = self
                    .config
                    .instrument(&req.instrument_id)
                    .ok_or_else(|| SimError::InstrumentNotFound(req.instrument_id.clone()))?;
                Ok(state.ledger.park_action(ParkedCancelOrderInfo {
                    investor_id: investor,
                    instrument_id: instrument.instrument_id.clone(),
                    exchange_id: instrument.exchange_id.clone(),
                    order_ref: req.order_ref.clone(),
                    order_action_ref: req.order_action_ref,
                    order_sys_id: req.order_sys_id.clone(),
                    parked_order_action_id: req.parked_order_action_id.clone(),
                    status: ParkedOrderStatus::NotSend,
                }))
            })
        };
        self.answer(token, outcome)
    }

    fn query_trading_account(
        &self,
        token: CorrelationToken,
        req: &QueryField,
    ) -> SessionResult<()> {
        let outcome = {
            let state = self.online()?;
            state.investor(&req.investor_id)
        };
        self.answer(token, outcome.and_then(|investor| self.account(&investor)))
    }

    fn query_order(&self, token: CorrelationToken, req: &QueryField) -> SessionResult<()> {
        let outcome = {
            let state = self.online()?;
            state
                .investor(&req.investor_id)
                .map(|investor| state.ledger.orders(&investor))
        };
        self.stream(token, outcome)
    }

    fn query_trade(&self, token: CorrelationToken, req: &QueryField) -> SessionResult<()> {
        let outcome = {
            let state = self.online()?;
            state
                .investor(&req.investor_id)
                .map(|investor| state.ledger.trades(&investor))
        };
        self.stream(token, outcome)
    }

    fn query_investor_position(
        &self,
        token: CorrelationToken,
        req: &QueryField,
    ) -> SessionResult<()> {
        let outcome = {
            let state = self.online()?;
            state
                .investor(&req.investor_id)
                .map(|investor| state.ledger.positions(&investor))
        };
        self.stream(token, outcome)
    }

    fn query_parked_order(&self, token: CorrelationToken, req: &QueryField) -> SessionResult<()> {
        let outcome = {
            let state = self.online()?;
            state
                .investor(&req.investor_id)
                .map(|investor| state.ledger.parked_orders(&investor))
        };
        self.stream(token, outcome)
    }

    fn query_parked_order_action(
        &self,
        token: CorrelationToken,
        req: &QueryField,
    ) -> SessionResult<()> {
        let outcome = {
            let state = self.online()?;
            state
                .investor(&req.investor_id)
                .map(|investor| state.ledger.parked_actions(&investor))
        };
        self.stream(token, outcome)
    }
}
