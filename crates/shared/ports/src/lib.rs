//! tradewire Ports
//!
//! Boundary between the correlation engine and the native trade session.
//! The session owns the physical link and wire protocol; it accepts requests
//! stamped with a correlation token and answers through [`DeliveryEvent`]s
//! pushed onto a single event channel.

mod codes;
mod error;
mod event;
mod fields;
mod session;

pub use codes::NativeCode;
pub use error::{CodeError, SessionError, SessionResult};
pub use event::{DeliveryEvent, EventReceiver, EventSender, RspInfo, SessionEvent, event_channel};
pub use fields::{
    InputOrderActionField, InputOrderField, LoginField, LogoutField, ParkedOrderActionField,
    ParkedOrderField, PasswordUpdateField, QueryField,
};
pub use session::TradeSession;
