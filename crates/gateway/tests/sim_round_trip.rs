//! End-to-end trading session against the simulated front: the client
//! issues calls, the front answers on the event channel and the dispatch
//! loop resolves each continuation.

use exchange_sim::{DeliveryMode, SimConfig, SimFront};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tradewire_core::{
    CancelOrderParameter, CorrelationToken, Direction, OffsetFlag, OrderParameter, OrderStatus,
    ParkedOrderStatus, PositionDirection,
};
use tradewire_gateway::{GatewayError, TradeClient};
use tradewire_ports::{DeliveryEvent, SessionError, SessionEvent, event_channel};

const FRONT: &str = "tcp://127.0.0.1:41205";

fn setup() -> (TradeClient<SimFront>, JoinHandle<()>) {
    let _ = env_logger::try_init();
    let (tx, rx) = event_channel();
    let front = Arc::new(SimFront::new(SimConfig::default(), tx).unwrap());
    let client = TradeClient::new(front);
    let handle = client.dispatcher().spawn(rx);
    (client, handle)
}

fn reply<T: Send + 'static>() -> (impl FnOnce(T) + Send + 'static, oneshot::Receiver<T>) {
    let (tx, rx) = oneshot::channel();
    (
        move |result| {
            let _ = tx.send(result);
        },
        rx,
    )
}

async fn wait<T>(rx: oneshot::Receiver<T>) -> T {
    timeout(Duration::from_secs(2), rx)
        .await
        .expect("continuation did not fire")
        .expect("continuation dropped")
}

async fn logged_in() -> (TradeClient<SimFront>, JoinHandle<()>) {
    let (client, handle) = setup();

    let (cb, rx) = reply();
    client.connect(cb, "9999", FRONT).unwrap();
    assert!(wait(rx).await.is_success);

    let (cb, rx) = reply();
    client.user_login(cb, "000001", "123456").unwrap();
    assert!(wait(rx).await.is_success);

    (client, handle)
}

fn limit(price: rust_decimal::Decimal) -> OrderParameter {
    OrderParameter::limit("rb2410", "SHFE", Direction::Buy, OffsetFlag::Open, price, 2)
}

#[tokio::test]
async fn test_connect_and_login() {
    let (client, _handle) = setup();
    assert!(!client.is_connected());

    let (cb, rx) = reply();
    let token = client.connect(cb, "9999", FRONT).unwrap();
    assert_eq!(token, CorrelationToken::CONNECT);
    assert!(wait(rx).await.is_success);
    assert!(client.is_connected());

    let (cb, rx) = reply();
    client.user_login(cb, "000001", "wrong").unwrap();
    let failed = wait(rx).await;
    assert!(!failed.is_success);
    assert_eq!(failed.error_code, Some(3));
    assert!(failed.payload.is_none());

    let (cb, rx) = reply();
    client.user_login(cb, "000001", "123456").unwrap();
    let login = wait(rx).await.payload.unwrap();
    assert_eq!(login.trading_day, "20240102");

    let ctx = client.session_context();
    assert_eq!(ctx.investor_id, "000001");
    assert_eq!(ctx.front_id, login.front_id);
    assert_eq!(ctx.session_id, login.session_id);
    assert_eq!(client.trading_day(), "20240102");
    assert!(client.pending_calls().is_empty());
}

#[tokio::test]
async fn test_order_lifecycle() {
    let (client, _handle) = logged_in().await;

    let (cb, rx) = reply();
    client.insert_order(cb, &limit(dec!(3600))).unwrap();
    let resting = wait(rx).await.payload.unwrap();
    assert_eq!(resting.status, OrderStatus::NoTradeQueueing);
    assert_eq!(resting.order_ref, "1");
    assert_eq!(resting.price, dec!(3600));

    let (cb, rx) = reply();
    let market = OrderParameter::market("rb2410", "SHFE", Direction::Buy, OffsetFlag::Open, 3);
    client.insert_order(cb, &market).unwrap();
    let filled = wait(rx).await.payload.unwrap();
    assert_eq!(filled.status, OrderStatus::AllTraded);
    assert_eq!(filled.volume_traded, 3);

    let (cb, rx) = reply();
    client.query_order(cb).unwrap();
    let orders = wait(rx).await.payload.unwrap();
    let refs: Vec<&str> = orders.iter().map(|o| o.order_ref.as_str()).collect();
    assert_eq!(refs, vec!["1", "2"]);

    let (cb, rx) = reply();
    client.query_trade(cb).unwrap();
    let trades = wait(rx).await.payload.unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].price, dec!(3650));

    let (cb, rx) = reply();
    client.query_position(cb).unwrap();
    let positions = wait(rx).await.payload.unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].direction, PositionDirection::Long);
    assert_eq!(positions[0].position, 3);

    let (cb, rx) = reply();
    client.query_account(cb).unwrap();
    let account = wait(rx).await.payload.unwrap();
    assert_eq!(account.balance, dec!(1000000));

    // Cancel the resting order by ref, then again
    let cancel = CancelOrderParameter::by_order_ref("rb2410", "SHFE", "1");
    let (cb, rx) = reply();
    client.cancel_order(cb, &cancel).unwrap();
    assert_eq!(wait(rx).await.payload.unwrap().status, OrderStatus::Canceled);

    let (cb, rx) = reply();
    client.cancel_order(cb, &cancel).unwrap();
    assert_eq!(wait(rx).await.error_code, Some(26));

    assert!(client.pending_calls().is_empty());
}

#[tokio::test]
async fn test_protocol_errors_arrive_as_failures() {
    let (client, _handle) = logged_in().await;

    let (cb, rx) = reply();
    let unknown =
        OrderParameter::limit("zz9999", "SHFE", Direction::Sell, OffsetFlag::Open, dec!(1), 1);
    client.insert_order(cb, &unknown).unwrap();
    let result = wait(rx).await;
    assert!(!result.is_success);
    assert_eq!(result.error_code, Some(16));

    let (cb, rx) = reply();
    client
        .cancel_order(cb, &CancelOrderParameter::by_sys_id("rb2410", "SHFE", "404"))
        .unwrap();
    assert_eq!(wait(rx).await.error_code, Some(25));

    let (cb, rx) = reply();
    client.update_user_password(cb, "bad", "654321").unwrap();
    assert!(!wait(rx).await.is_success);

    let (cb, rx) = reply();
    client.update_user_password(cb, "123456", "654321").unwrap();
    assert!(wait(rx).await.is_success);
}

#[tokio::test]
async fn test_empty_queries_resolve_empty_lists() {
    let (client, _handle) = logged_in().await;

    let (cb, rx) = reply();
    client.query_trade(cb).unwrap();
    let trades = wait(rx).await;
    assert!(trades.is_success);
    assert!(trades.payload.unwrap().is_empty());

    let (cb, rx) = reply();
    client.query_parked_order(cb).unwrap();
    assert!(wait(rx).await.payload.unwrap().is_empty());
}

#[tokio::test]
async fn test_parked_orders() {
    let (client, _handle) = logged_in().await;

    let (cb, rx) = reply();
    client
        .insert_parked_order(cb, &limit(dec!(3550)).parked(""))
        .unwrap();
    let parked = wait(rx).await.payload.unwrap();
    assert_eq!(parked.status, ParkedOrderStatus::NotSend);
    assert!(!parked.parked_order_id.is_empty());

    let (cb, rx) = reply();
    client
        .cancel_parked_order(cb, &CancelOrderParameter::by_order_ref("rb2410", "SHFE", "1"))
        .unwrap();
    let action = wait(rx).await.payload.unwrap();
    assert_eq!(action.order_ref, "1");

    let (cb, rx) = reply();
    client.query_parked_order(cb).unwrap();
    assert_eq!(wait(rx).await.payload.unwrap().len(), 1);

    let (cb, rx) = reply();
    client.query_parked_order_action(cb).unwrap();
    assert_eq!(wait(rx).await.payload.unwrap().len(), 1);
}

#[tokio::test]
async fn test_shuffled_delivery_resolves_every_call() {
    let (client, _handle) = logged_in().await;
    for price in [dec!(3600), dec!(3610), dec!(3620)] {
        let (cb, rx) = reply();
        client.insert_order(cb, &limit(price)).unwrap();
        wait(rx).await;
    }

    client.session().set_delivery_mode(DeliveryMode::Held);

    let mut order_lists = Vec::new();
    let mut accounts = Vec::new();
    for _ in 0..10 {
        let (cb, rx) = reply();
        client.query_order(cb).unwrap();
        order_lists.push(rx);

        let (cb, rx) = reply();
        client.query_account(cb).unwrap();
        accounts.push(rx);
    }
    assert_eq!(client.pending_calls().len(), 20);

    let mut rng = StdRng::seed_from_u64(2024);
    client.session().release_shuffled_with(&mut rng).unwrap();

    for rx in order_lists {
        let orders = wait(rx).await.payload.unwrap();
        let prices: Vec<_> = orders.iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![dec!(3600), dec!(3610), dec!(3620)]);
    }
    for rx in accounts {
        assert_eq!(wait(rx).await.payload.unwrap().investor_id, "000001");
    }
    assert!(client.pending_calls().is_empty());
}

#[tokio::test]
async fn test_stray_events_and_heartbeat() {
    let (client, _handle) = logged_in().await;
    let mut events = client.subscribe_session_events();

    let front = client.session();
    front.inject(DeliveryEvent::ack(CorrelationToken::new(999))).unwrap();
    front
        .inject(DeliveryEvent::end_of_stream(CorrelationToken::new(998)))
        .unwrap();
    front.heartbeat_warning(45).unwrap();

    let event = timeout(Duration::from_secs(2), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, SessionEvent::HeartbeatWarning { elapsed_secs: 45 });

    // The delivery path survived the stray events
    let (cb, rx) = reply();
    client.query_account(cb).unwrap();
    assert!(wait(rx).await.is_success);
    assert_eq!(client.dispatcher().aggregator().in_flight(), 0);
}

#[tokio::test]
async fn test_refused_when_disconnected() {
    let (client, _handle) = setup();

    let (cb, _rx) = reply::<tradewire_gateway::ListResult<tradewire_core::OrderInfo>>();
    let err = client.query_order(cb).unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Session(SessionError::NotConnected)
    ));
    assert!(client.pending_calls().is_empty());
}

#[tokio::test]
async fn test_dropped_connection_leaves_calls_pending() {
    let (client, _handle) = logged_in().await;
    let mut events = client.subscribe_session_events();
    client.session().set_delivery_mode(DeliveryMode::Held);

    let (cb, _rx) = reply();
    let token = client.query_order(cb).unwrap();

    client.session().set_delivery_mode(DeliveryMode::Immediate);
    client.session().drop_connection(0x1001).unwrap();

    let event = timeout(Duration::from_secs(2), events.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, SessionEvent::Disconnected { reason: 0x1001 });
    assert!(!client.is_connected());

    // Outstanding calls are indeterminate, not failed
    assert_eq!(client.pending_calls(), vec![token]);
}

#[tokio::test]
async fn test_logout_and_disconnect() {
    let (client, handle) = logged_in().await;

    let (cb, rx) = reply();
    client.user_logout(cb).unwrap();
    assert!(wait(rx).await.is_success);
    assert!(!client.session_context().is_logged_in());

    let order = limit(dec!(3600));
    let (cb, _rx) = reply();
    assert!(matches!(
        client.insert_order(cb, &order),
        Err(GatewayError::NotLoggedIn)
    ));

    let (cb, rx) = reply();
    assert_eq!(client.disconnect(cb).unwrap(), CorrelationToken::DISCONNECT);
    assert!(wait(rx).await.is_success);
    assert!(!client.is_connected());

    // Dropping the client drops the session and with it the event sender
    drop(client);
    timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
}
