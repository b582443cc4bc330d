//! Delivery events raised by a native session

use tokio::sync::mpsc;
use tradewire_core::{CorrelationToken, Record};

/// Native error structure attached to responses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RspInfo {
    pub error_id: i32,
    pub error_msg: String,
}

impl RspInfo {
    pub fn new(error_id: i32, error_msg: impl Into<String>) -> Self {
        Self {
            error_id,
            error_msg: error_msg.into(),
        }
    }

    /// Any non-zero code is a protocol error
    pub fn is_error(&self) -> bool {
        self.error_id != 0
    }
}

/// Unsolicited session lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Front connection established
    Connected,
    /// Front connection lost, with the native reason code
    Disconnected { reason: i32 },
    /// No traffic received for `elapsed_secs`
    HeartbeatWarning { elapsed_secs: i32 },
}

impl SessionEvent {
    /// Reserved token a lifecycle listener is armed on, if any
    pub fn token(&self) -> Option<CorrelationToken> {
        match self {
            SessionEvent::Connected => Some(CorrelationToken::CONNECT),
            SessionEvent::Disconnected { .. } => Some(CorrelationToken::DISCONNECT),
            SessionEvent::HeartbeatWarning { .. } => None,
        }
    }
}

/// One inbound event from the native session
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryEvent {
    /// Request-level error with no payload
    Error { token: CorrelationToken, info: RspInfo },

    /// Single response to a unary request
    UnaryReply {
        token: CorrelationToken,
        info: Option<RspInfo>,
        record: Option<Record>,
    },

    /// One page of a list response; `is_last` marks the terminal record
    StreamRecord {
        token: CorrelationToken,
        info: Option<RspInfo>,
        record: Option<Record>,
        is_last: bool,
    },

    /// Session lifecycle notification
    Session(SessionEvent),
}

impl DeliveryEvent {
    /// Successful unary reply carrying a record
    pub fn reply(token: CorrelationToken, record: impl Into<Record>) -> Self {
        DeliveryEvent::UnaryReply {
            token,
            info: None,
            record: Some(record.into()),
        }
    }

    /// Successful unary reply with no payload
    pub fn ack(token: CorrelationToken) -> Self {
        DeliveryEvent::UnaryReply {
            token,
            info: None,
            record: None,
        }
    }

    /// Request-level error
    pub fn error(token: CorrelationToken, info: RspInfo) -> Self {
        DeliveryEvent::Error { token, info }
    }

    /// One record of a list response
    pub fn record(token: CorrelationToken, record: impl Into<Record>, is_last: bool) -> Self {
        DeliveryEvent::StreamRecord {
            token,
            info: None,
            record: Some(record.into()),
            is_last,
        }
    }

    /// Terminal marker of a list response that carries no record
    pub fn end_of_stream(token: CorrelationToken) -> Self {
        DeliveryEvent::StreamRecord {
            token,
            info: None,
            record: None,
            is_last: true,
        }
    }

    /// Token the event is addressed to
    pub fn token(&self) -> Option<CorrelationToken> {
        match self {
            DeliveryEvent::Error { token, .. }
            | DeliveryEvent::UnaryReply { token, .. }
            | DeliveryEvent::StreamRecord { token, .. } => Some(*token),
            DeliveryEvent::Session(event) => event.token(),
        }
    }
}

/// Sending half handed to the native session
pub type EventSender = mpsc::UnboundedSender<DeliveryEvent>;

/// Receiving half consumed by the dispatch loop
pub type EventReceiver = mpsc::UnboundedReceiver<DeliveryEvent>;

/// Create the single event channel of a connection
///
/// Unbounded so that the native callback thread never blocks on delivery.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
