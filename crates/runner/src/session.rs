//! Scripted trading session
//!
//! Wires a [`TradeClient`] to the simulated front, drives one session from
//! connect to disconnect and reports what the front answered.

use crate::config::{RunnerConfig, ScriptConfig};
use crate::error::{Result, RunnerError};
use exchange_sim::{DeliveryMode, SimFront};
use log::{info, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tradewire_core::{
    CancelOrderParameter, Direction, OffsetFlag, OrderParameter, OrderStatus, PositionInfo,
};
use tradewire_gateway::{ResultEnvelope, TradeClient};
use tradewire_ports::event_channel;

/// Summary of a completed session
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    pub trading_day: String,
    pub front_id: i32,
    pub session_id: i32,
    /// Orders accepted by the front
    pub orders_placed: usize,
    pub orders_cancelled: usize,
    pub orders_resting: usize,
    pub trades: usize,
    pub positions: Vec<PositionInfo>,
    pub balance: Decimal,
    /// Calls still pending when the session ended
    pub pending_at_exit: usize,
}

/// Continuation that forwards its result to a oneshot receiver
fn reply<T: Send + 'static>() -> (impl FnOnce(T) + Send + 'static, oneshot::Receiver<T>) {
    let (tx, rx) = oneshot::channel();
    (
        move |result| {
            // Receiver may have timed out
            let _ = tx.send(result);
        },
        rx,
    )
}

async fn wait<T>(
    operation: &'static str,
    limit: Duration,
    rx: oneshot::Receiver<ResultEnvelope<T>>,
) -> Result<Option<T>> {
    let envelope = timeout(limit, rx)
        .await
        .map_err(|_| RunnerError::Timeout(operation))?
        .map_err(|_| RunnerError::Abandoned(operation))?;

    envelope.into_result().map_err(|e| RunnerError::Call {
        operation,
        code: e.code,
        message: e.message,
    })
}

/// Run the scripted session against a fresh simulated front
pub async fn run_session(config: &RunnerConfig) -> Result<SessionReport> {
    let script = &config.script;
    let limit = Duration::from_millis(script.call_timeout_ms);

    let (tx, rx) = event_channel();
    let front = Arc::new(SimFront::new(config.simulator.clone(), tx)?);
    let client = TradeClient::with_config(Arc::clone(&front), &config.gateway);
    let dispatch = client.dispatcher().spawn(rx);
    let mut report = SessionReport::default();

    // Connect and log in
    let (cb, rx) = reply();
    client.connect(cb, &config.gateway.broker_id, &config.gateway.front_address)?;
    wait("connect", limit, rx).await?;

    let (cb, rx) = reply();
    client.user_login(cb, &config.gateway.investor_id, &config.gateway.password)?;
    if let Some(login) = wait("user_login", limit, rx).await? {
        info!(
            "Session {}/{} on trading day {}",
            login.front_id, login.session_id, login.trading_day
        );
        report.trading_day = login.trading_day;
        report.front_id = login.front_id;
        report.session_id = login.session_id;
    }

    // Resting ladder plus one marketable order
    let mut resting_refs = Vec::new();
    for order in ladder(script) {
        let (cb, rx) = reply();
        client.insert_order(cb, &order)?;
        match wait("insert_order", limit, rx).await {
            Ok(Some(placed)) => {
                report.orders_placed += 1;
                if placed.status == OrderStatus::NoTradeQueueing {
                    resting_refs.push(placed.order_ref);
                }
            }
            Ok(None) => report.orders_placed += 1,
            Err(RunnerError::Call { code, message, .. }) => {
                warn!("Order rejected ({}): {}", code, message);
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(order_ref) = resting_refs.first() {
        let cancel = CancelOrderParameter::by_order_ref(
            script.instrument_id.as_str(),
            script.exchange_id.as_str(),
            order_ref.as_str(),
        );
        let (cb, rx) = reply();
        client.cancel_order(cb, &cancel)?;
        if wait("cancel_order", limit, rx).await?.is_some() {
            report.orders_cancelled += 1;
        }
    }

    // Queries, optionally answered out of order
    if script.shuffle_delivery {
        front.set_delivery_mode(DeliveryMode::Held);
    }
    let (orders_cb, orders_rx) = reply();
    client.query_order(orders_cb)?;
    let (trades_cb, trades_rx) = reply();
    client.query_trade(trades_cb)?;
    let (positions_cb, positions_rx) = reply();
    client.query_position(positions_cb)?;
    let (account_cb, account_rx) = reply();
    client.query_account(account_cb)?;
    if script.shuffle_delivery {
        let released = front.release_shuffled()?;
        info!("Released {} query events out of order", released);
        front.set_delivery_mode(DeliveryMode::Immediate);
    }

    let orders = wait("query_order", limit, orders_rx).await?.unwrap_or_default();
    report.orders_resting = orders
        .iter()
        .filter(|o| o.status.is_active())
        .count();
    report.trades = wait("query_trade", limit, trades_rx)
        .await?
        .map(|t| t.len())
        .unwrap_or_default();
    report.positions = wait("query_position", limit, positions_rx)
        .await?
        .unwrap_or_default();
    if let Some(account) = wait("query_account", limit, account_rx).await? {
        report.balance = account.balance;
    }

    // Log out and disconnect
    let (cb, rx) = reply();
    client.user_logout(cb)?;
    wait("user_logout", limit, rx).await?;

    let (cb, rx) = reply();
    client.disconnect(cb)?;
    wait("disconnect", limit, rx).await?;

    report.pending_at_exit = client.pending_calls().len();
    drop(client);
    drop(front);
    if dispatch.await.is_err() {
        warn!("Dispatch loop ended abnormally");
    }

    info!(
        "Session done: {} placed, {} cancelled, {} trades",
        report.orders_placed, report.orders_cancelled, report.trades
    );
    Ok(report)
}

/// Limit buys stepping down from the script price, then one market buy
fn ladder(script: &ScriptConfig) -> Vec<OrderParameter> {
    let mut orders: Vec<OrderParameter> = (0..script.orders)
        .map(|i| {
            OrderParameter::limit(
                script.instrument_id.as_str(),
                script.exchange_id.as_str(),
                Direction::Buy,
                OffsetFlag::Open,
                script.price - script.tick * Decimal::from(i),
                script.volume,
            )
        })
        .collect();
    orders.push(OrderParameter::market(
        script.instrument_id.as_str(),
        script.exchange_id.as_str(),
        Direction::Buy,
        OffsetFlag::Open,
        script.volume,
    ));
    orders
}
