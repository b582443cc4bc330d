//! Typed trade operations over a native session
//!
//! Every operation follows the same path: allocate a token (or use a
//! reserved one), register the continuation, then hand the request to the
//! session. Registration happens first so a reply can never race ahead of
//! its continuation. If the session refuses the request, the registration
//! is taken back and the error is returned to the caller; the continuation
//! never fires.

use super::convert::{self, RequestScope};
use crate::config::GatewayConfig;
use crate::correlation::{PendingCallRegistry, TokenAllocator};
use crate::dispatcher::Dispatcher;
use crate::error::{GatewayError, Result};
use crate::messages::{Continuation, DataResult, ListResult, UnitResult};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tradewire_core::{
    AccountInfo, CancelOrderParameter, CorrelationToken, LoginInfo, OrderInfo, OrderParameter,
    ParkedCancelOrderInfo, ParkedOrderInfo, PositionInfo, TradeInfo,
};
use tradewire_ports::{
    LoginField, LogoutField, PasswordUpdateField, QueryField, SessionEvent, SessionResult,
    TradeSession,
};

/// Identity learned from connect and login
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub broker_id: String,
    /// Empty until a login succeeds
    pub investor_id: String,
    pub front_id: i32,
    pub session_id: i32,
    pub trading_day: String,
    /// Last order reference handed out
    pub order_ref: i32,
}

impl SessionContext {
    pub fn is_logged_in(&self) -> bool {
        !self.investor_id.is_empty()
    }

    pub fn scope(&self) -> RequestScope<'_> {
        RequestScope {
            broker_id: &self.broker_id,
            investor_id: &self.investor_id,
            front_id: self.front_id,
            session_id: self.session_id,
        }
    }

    fn next_order_ref(&mut self) -> String {
        self.order_ref = self.order_ref.saturating_add(1);
        self.order_ref.to_string()
    }

    fn record_login(&mut self, investor_id: &str, login: &LoginInfo) {
        self.investor_id = investor_id.to_string();
        self.front_id = login.front_id;
        self.session_id = login.session_id;
        self.trading_day = login.trading_day.clone();
        // Order refs must stay above the session's high-water mark
        let max_order_ref = login.max_order_ref.trim().parse().unwrap_or(0);
        self.order_ref = self.order_ref.max(max_order_ref);
    }

    fn clear_login(&mut self) {
        self.investor_id.clear();
        self.front_id = 0;
        self.session_id = 0;
    }
}

/// Synchronous call-style API over an asynchronous trade session
///
/// Each operation returns the token it was issued under as soon as the
/// request has been handed to the session; the continuation fires later,
/// exactly once, from the dispatch loop.
pub struct TradeClient<S> {
    session: Arc<S>,
    allocator: TokenAllocator,
    registry: PendingCallRegistry,
    dispatcher: Arc<Dispatcher>,
    context: Arc<RwLock<SessionContext>>,
}

impl<S: TradeSession> TradeClient<S> {
    pub fn new(session: Arc<S>) -> Self {
        Self::with_config(session, &GatewayConfig::default())
    }

    pub fn with_config(session: Arc<S>, config: &GatewayConfig) -> Self {
        let registry = PendingCallRegistry::new();
        let dispatcher = Arc::new(Dispatcher::new(
            registry.clone(),
            config.session_event_capacity,
        ));
        let context = SessionContext {
            broker_id: config.broker_id.clone(),
            ..SessionContext::default()
        };

        Self {
            session,
            allocator: TokenAllocator::new(),
            registry,
            dispatcher,
            context: Arc::new(RwLock::new(context)),
        }
    }

    /// Dispatcher to drive with the session's event channel
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    pub fn is_connected(&self) -> bool {
        self.dispatcher.is_connected()
    }

    /// Snapshot of the broker, investor and session identity
    pub fn session_context(&self) -> SessionContext {
        self.context.read().clone()
    }

    pub fn subscribe_session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.dispatcher.subscribe()
    }

    /// Tokens still waiting for a terminal event
    pub fn pending_calls(&self) -> Vec<CorrelationToken> {
        self.registry.pending_tokens()
    }

    pub fn trading_day(&self) -> String {
        self.session.trading_day()
    }

    // ------------------------------------------------------------------
    // Session lifecycle (reserved tokens)
    // ------------------------------------------------------------------

    /// Connect to the trading front; `callback` fires on the next
    /// connected event
    pub fn connect(
        &self,
        callback: impl FnOnce(UnitResult) + Send + 'static,
        broker_id: &str,
        front_address: &str,
    ) -> Result<CorrelationToken> {
        info!("Connecting to {} as broker {}", front_address, broker_id);
        self.context.write().broker_id = broker_id.to_string();

        self.issue(
            CorrelationToken::CONNECT,
            Continuation::unit(callback),
            |_| self.session.connect(broker_id, front_address),
        )
    }

    /// Disconnect from the trading front; `callback` fires on the next
    /// disconnected event
    pub fn disconnect(
        &self,
        callback: impl FnOnce(UnitResult) + Send + 'static,
    ) -> Result<CorrelationToken> {
        info!("Disconnecting from trading front");
        self.issue(
            CorrelationToken::DISCONNECT,
            Continuation::unit(callback),
            |_| self.session.disconnect(),
        )
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    pub fn user_login(
        &self,
        callback: impl FnOnce(DataResult<LoginInfo>) + Send + 'static,
        investor_id: &str,
        password: &str,
    ) -> Result<CorrelationToken> {
        let context = Arc::clone(&self.context);
        let investor = investor_id.to_string();
        let continuation = Continuation::single(move |result: DataResult<LoginInfo>| {
            if let Some(login) = result.payload.as_ref().filter(|_| result.is_success) {
                info!(
                    "Logged in as {} (front {}, session {}, trading day {})",
                    investor, login.front_id, login.session_id, login.trading_day
                );
                context.write().record_login(&investor, login);
            }
            callback(result)
        });

        let req = LoginField {
            broker_id: self.context.read().broker_id.clone(),
            user_id: investor_id.to_string(),
            password: password.to_string(),
        };
        self.fire(continuation, |token| self.session.user_login(token, &req))
    }

    pub fn user_logout(
        &self,
        callback: impl FnOnce(UnitResult) + Send + 'static,
    ) -> Result<CorrelationToken> {
        let context = Arc::clone(&self.context);
        let continuation = Continuation::unit(move |result: UnitResult| {
            if result.is_success {
                context.write().clear_login();
            }
            callback(result)
        });

        let req = {
            let ctx = self.context.read();
            LogoutField {
                broker_id: ctx.broker_id.clone(),
                user_id: ctx.investor_id.clone(),
            }
        };
        self.fire(continuation, |token| self.session.user_logout(token, &req))
    }

    pub fn update_user_password(
        &self,
        callback: impl FnOnce(UnitResult) + Send + 'static,
        old_password: &str,
        new_password: &str,
    ) -> Result<CorrelationToken> {
        let req = {
            let ctx = self.context.read();
            PasswordUpdateField {
                broker_id: ctx.broker_id.clone(),
                user_id: ctx.investor_id.clone(),
                old_password: old_password.to_string(),
                new_password: new_password.to_string(),
            }
        };
        self.fire(Continuation::unit(callback), |token| {
            self.session.update_user_password(token, &req)
        })
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    /// Insert an order; an empty `order_ref` is filled from the session's
    /// order reference sequence
    pub fn insert_order(
        &self,
        callback: impl FnOnce(DataResult<OrderInfo>) + Send + 'static,
        order: &OrderParameter,
    ) -> Result<CorrelationToken> {
        let (ctx, order_ref) = self.trading_scope(&order.order_ref)?;
        debug!(
            "Insert order {} {:?} {} @ {} ref {}",
            order.instrument_id, order.direction, order.volume, order.price, order_ref
        );

        self.fire(Continuation::single(callback), |token| {
            let req = convert::input_order(ctx.scope(), order, &order_ref, token.get());
            self.session.order_insert(token, &req)
        })
    }

    /// Cancel a working order, identified by exchange id or by order ref
    /// within this session
    pub fn cancel_order(
        &self,
        callback: impl FnOnce(DataResult<OrderInfo>) + Send + 'static,
        cancel: &CancelOrderParameter,
    ) -> Result<CorrelationToken> {
        let ctx = self.logged_in()?;
        debug!(
            "Cancel order {} sys_id '{}' ref '{}'",
            cancel.instrument_id, cancel.order_sys_id, cancel.order_ref
        );

        self.fire(Continuation::single(callback), |token| {
            let req = convert::order_action(ctx.scope(), cancel, token.get());
            self.session.order_action(token, &req)
        })
    }

    pub fn insert_parked_order(
        &self,
        callback: impl FnOnce(DataResult<ParkedOrderInfo>) + Send + 'static,
        order: &OrderParameter,
    ) -> Result<CorrelationToken> {
        let (ctx, order_ref) = self.trading_scope(&order.order_ref)?;

        self.fire(Continuation::single(callback), |token| {
            let req = convert::parked_order(ctx.scope(), order, &order_ref, token.get());
            self.session.parked_order_insert(token, &req)
        })
    }

    pub fn cancel_parked_order(
        &self,
        callback: impl FnOnce(DataResult<ParkedCancelOrderInfo>) + Send + 'static,
        cancel: &CancelOrderParameter,
    ) -> Result<CorrelationToken> {
        let ctx = self.logged_in()?;

        self.fire(Continuation::single(callback), |token| {
            let req = convert::parked_order_action(ctx.scope(), cancel, token.get());
            self.session.parked_order_action(token, &req)
        })
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn query_account(
        &self,
        callback: impl FnOnce(DataResult<AccountInfo>) + Send + 'static,
    ) -> Result<CorrelationToken> {
        let req = self.query_field();
        self.fire(Continuation::single(callback), |token| {
            self.session.query_trading_account(token, &req)
        })
    }

    pub fn query_order(
        &self,
        callback: impl FnOnce(ListResult<OrderInfo>) + Send + 'static,
    ) -> Result<CorrelationToken> {
        let req = self.query_field();
        self.fire(Continuation::list(callback), |token| {
            self.session.query_order(token, &req)
        })
    }

    pub fn query_trade(
        &self,
        callback: impl FnOnce(ListResult<TradeInfo>) + Send + 'static,
    ) -> Result<CorrelationToken> {
        let req = self.query_field();
        self.fire(Continuation::list(callback), |token| {
            self.session.query_trade(token, &req)
        })
    }

    pub fn query_position(
        &self,
        callback: impl FnOnce(ListResult<PositionInfo>) + Send + 'static,
    ) -> Result<CorrelationToken> {
        let req = self.query_field();
        self.fire(Continuation::list(callback), |token| {
            self.session.query_investor_position(token, &req)
        })
    }

    pub fn query_parked_order(
        &self,
        callback: impl FnOnce(ListResult<ParkedOrderInfo>) + Send + 'static,
    ) -> Result<CorrelationToken> {
        let req = self.query_field();
        self.fire(Continuation::list(callback), |token| {
            self.session.query_parked_order(token, &req)
        })
    }

    pub fn query_parked_order_action(
        &self,
        callback: impl FnOnce(ListResult<ParkedCancelOrderInfo>) + Send + 'static,
    ) -> Result<CorrelationToken> {
        let req = self.query_field();
        self.fire(Continuation::list(callback), |token| {
            self.session.query_parked_order_action(token, &req)
        })
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    /// Allocate a fresh token and issue the request under it
    fn fire(
        &self,
        continuation: Continuation,
        send: impl FnOnce(CorrelationToken) -> SessionResult<()>,
    ) -> Result<CorrelationToken> {
        let token = self.allocator.next()?;
        self.issue(token, continuation, send)
    }

    fn issue(
        &self,
        token: CorrelationToken,
        continuation: Continuation,
        send: impl FnOnce(CorrelationToken) -> SessionResult<()>,
    ) -> Result<CorrelationToken> {
        let displaced = self.registry.register(token, continuation)?;
        if let Some(previous) = &displaced {
            debug!("Replaced {:?} listener on {}", previous, token);
        }

        if let Err(e) = send(token) {
            self.registry.take(token);
            self.dispatcher.aggregator().discard(token);
            // A refused re-arm leaves the earlier listener in place
            let restored = displaced.map(|previous| self.registry.register(token, previous));
            if let Some(Err(restore)) = restored {
                warn!("Could not restore listener on {}: {}", token, restore);
            }
            warn!("Request {} refused by session: {}", token, e);
            return Err(e.into());
        }

        debug!("Issued request {}", token);
        Ok(token)
    }

    fn query_field(&self) -> QueryField {
        let ctx = self.context.read();
        QueryField {
            broker_id: ctx.broker_id.clone(),
            investor_id: ctx.investor_id.clone(),
        }
    }

    fn logged_in(&self) -> Result<SessionContext> {
        let ctx = self.context.read();
        if !ctx.is_logged_in() {
            warn!("Trading request rejected: not logged in");
            return Err(GatewayError::NotLoggedIn);
        }
        Ok(ctx.clone())
    }

    /// Context snapshot plus the order ref to use for a new order
    fn trading_scope(&self, order_ref: &str) -> Result<(SessionContext, String)> {
        let mut ctx = self.context.write();
        if !ctx.is_logged_in() {
            warn!("Trading request rejected: not logged in");
            return Err(GatewayError::NotLoggedIn);
        }
        let order_ref = if order_ref.is_empty() {
            ctx.next_order_ref()
        } else {
            order_ref.to_string()
        };
        Ok((ctx.clone(), order_ref))
    }
}
