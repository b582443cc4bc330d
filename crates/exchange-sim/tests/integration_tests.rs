//! Drives the simulated front directly through the native session port and
//! checks the raw delivery events it produces.

use exchange_sim::{DeliveryMode, SimConfig, SimFront};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tradewire_core::{
    CorrelationToken, Direction, HedgeFlag, OffsetFlag, OrderPriceType, Record, RecordKind,
    TimeCondition,
};
use tradewire_ports::{
    DeliveryEvent, EventReceiver, InputOrderActionField, InputOrderField, LoginField, NativeCode,
    QueryField, SessionError, SessionEvent, TradeSession, event_channel,
};

fn token(raw: i32) -> CorrelationToken {
    CorrelationToken::new(raw)
}

fn setup() -> (SimFront, EventReceiver) {
    let _ = env_logger::try_init();
    let (tx, rx) = event_channel();
    let front = SimFront::new(SimConfig::default(), tx).unwrap();
    (front, rx)
}

fn drain(rx: &mut EventReceiver) -> Vec<DeliveryEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn login(front: &SimFront, rx: &mut EventReceiver) {
    front.connect("9999", "tcp://127.0.0.1:41205").unwrap();
    front
        .user_login(
            token(1),
            &LoginField {
                broker_id: "9999".to_string(),
                user_id: "000001".to_string(),
                password: "123456".to_string(),
            },
        )
        .unwrap();
    drain(rx);
}

fn query() -> QueryField {
    QueryField {
        broker_id: "9999".to_string(),
        investor_id: "000001".to_string(),
    }
}

fn order(order_ref: &str, price_type: OrderPriceType, instrument: &str) -> InputOrderField {
    InputOrderField {
        broker_id: "9999".to_string(),
        investor_id: "000001".to_string(),
        user_id: "000001".to_string(),
        instrument_id: instrument.to_string(),
        exchange_id: "SHFE".to_string(),
        order_ref: order_ref.to_string(),
        direction: Direction::Buy.to_code(),
        order_price_type: price_type.to_code(),
        comb_offset_flag: OffsetFlag::Open.to_code(),
        comb_hedge_flag: HedgeFlag::Speculation.to_code(),
        limit_price: 3600.0,
        volume_total_original: 1,
        min_volume: 1,
        time_condition: TimeCondition::GFD.to_code(),
        ..InputOrderField::default()
    }
}

#[test]
fn test_requests_refused_while_disconnected() {
    let (front, mut rx) = setup();
    let err = front.query_order(token(1), &query()).unwrap_err();
    assert_eq!(err, SessionError::NotConnected);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_connect_emits_session_event() {
    let (front, mut rx) = setup();
    front.connect("9999", "tcp://127.0.0.1:41205").unwrap();

    assert!(front.is_connected());
    assert_eq!(
        drain(&mut rx),
        vec![DeliveryEvent::Session(SessionEvent::Connected)]
    );
}

#[test]
fn test_bad_password_fails_on_reply() {
    let (front, mut rx) = setup();
    front.connect("9999", "tcp://127.0.0.1:41205").unwrap();
    drain(&mut rx);

    front
        .user_login(
            token(1),
            &LoginField {
                broker_id: "9999".to_string(),
                user_id: "000001".to_string(),
                password: "wrong".to_string(),
            },
        )
        .unwrap();

    match drain(&mut rx).as_slice() {
        [DeliveryEvent::UnaryReply {
            info: Some(info),
            record: None,
            ..
        }] => assert_eq!(info.error_id, 3),
        other => panic!("unexpected events {:?}", other),
    }
}

#[test]
fn test_empty_query_sends_terminal_marker() {
    let (front, mut rx) = setup();
    login(&front, &mut rx);

    front.query_trade(token(2), &query()).unwrap();
    assert_eq!(drain(&mut rx), vec![DeliveryEvent::end_of_stream(token(2))]);
}

#[test]
fn test_query_streams_records_with_last_flag() {
    let (front, mut rx) = setup();
    login(&front, &mut rx);

    for (i, order_ref) in ["1", "2", "3"].iter().enumerate() {
        let req = order(order_ref, OrderPriceType::LimitPrice, "rb2410");
        front.order_insert(token(10 + i as i32), &req).unwrap();
    }
    drain(&mut rx);

    front.query_order(token(20), &query()).unwrap();
    let flags: Vec<(RecordKind, bool)> = drain(&mut rx)
        .into_iter()
        .map(|event| match event {
            DeliveryEvent::StreamRecord {
                record: Some(record),
                is_last,
                ..
            } => (record.kind(), is_last),
            other => panic!("unexpected event {:?}", other),
        })
        .collect();

    assert_eq!(
        flags,
        vec![
            (RecordKind::Order, false),
            (RecordKind::Order, false),
            (RecordKind::Order, true)
        ]
    );
}

#[test]
fn test_unknown_instrument_is_error_event() {
    let (front, mut rx) = setup();
    login(&front, &mut rx);

    front
        .order_insert(token(5), &order("1", OrderPriceType::LimitPrice, "zz9999"))
        .unwrap();

    match drain(&mut rx).as_slice() {
        [DeliveryEvent::Error { token: t, info }] => {
            assert_eq!(*t, token(5));
            assert_eq!(info.error_id, 16);
        }
        other => panic!("unexpected events {:?}", other),
    }
}

#[test]
fn test_invalid_native_code_is_refused() {
    let (front, mut rx) = setup();
    login(&front, &mut rx);

    let mut bad = order("1", OrderPriceType::LimitPrice, "rb2410");
    bad.direction = b'9';
    let err = front.order_insert(token(6), &bad).unwrap_err();

    assert!(matches!(err, SessionError::Code(_)));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn test_market_order_creates_trade_and_position() {
    let (front, mut rx) = setup();
    login(&front, &mut rx);

    front
        .order_insert(token(2), &order("1", OrderPriceType::AnyPrice, "rb2410"))
        .unwrap();
    drain(&mut rx);

    front.query_trade(token(3), &query()).unwrap();
    front.query_investor_position(token(4), &query()).unwrap();
    let events = drain(&mut rx);

    let kinds: Vec<(CorrelationToken, RecordKind)> = events
        .iter()
        .filter_map(|event| match event {
            DeliveryEvent::StreamRecord {
                token,
                record: Some(record),
                is_last: true,
                ..
            } => Some((*token, record.kind())),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![(token(3), RecordKind::Trade), (token(4), RecordKind::Position)]
    );
}

#[test]
fn test_cancel_unknown_order() {
    let (front, mut rx) = setup();
    login(&front, &mut rx);

    front
        .order_action(
            token(7),
            &InputOrderActionField {
                broker_id: "9999".to_string(),
                investor_id: "000001".to_string(),
                order_ref: "404".to_string(),
                front_id: 1,
                session_id: 1,
                ..InputOrderActionField::default()
            },
        )
        .unwrap();

    match drain(&mut rx).as_slice() {
        [DeliveryEvent::Error { info, .. }] => assert_eq!(info.error_id, 25),
        other => panic!("unexpected events {:?}", other),
    }
}

#[test]
fn test_held_events_release_shuffled() {
    let (front, mut rx) = setup();
    login(&front, &mut rx);
    front.set_delivery_mode(DeliveryMode::Held);

    for raw in 2..12 {
        front.query_trading_account(token(raw), &query()).unwrap();
    }
    assert!(drain(&mut rx).is_empty());
    assert_eq!(front.held_events(), 10);

    let mut rng = StdRng::seed_from_u64(42);
    assert_eq!(front.release_shuffled_with(&mut rng).unwrap(), 10);

    let mut tokens: Vec<i32> = drain(&mut rx)
        .iter()
        .filter_map(|event| match event {
            DeliveryEvent::UnaryReply {
                token,
                record: Some(Record::Account(_)),
                ..
            } => Some(token.get()),
            _ => None,
        })
        .collect();
    tokens.sort();
    assert_eq!(tokens, (2..12).collect::<Vec<_>>());
}

#[test]
fn test_dropped_connection_logs_out() {
    let (front, mut rx) = setup();
    login(&front, &mut rx);

    front.drop_connection(0x1001).unwrap();
    assert_eq!(
        drain(&mut rx),
        vec![DeliveryEvent::Session(SessionEvent::Disconnected {
            reason: 0x1001
        })]
    );

    front.connect("9999", "tcp://127.0.0.1:41205").unwrap();
    drain(&mut rx);
    front.query_order(token(9), &query()).unwrap();
    match drain(&mut rx).as_slice() {
        [DeliveryEvent::Error { info, .. }] => assert_eq!(info.error_id, 4),
        other => panic!("unexpected events {:?}", other),
    }
}
