//! Caller-facing adapters
//!
//! [`TradeClient`] turns typed trade operations into registered pending calls
//! plus fire-and-forget requests on a [`TradeSession`](tradewire_ports::TradeSession).
//! [`convert`] maps domain parameters onto native request fields.

mod client;
pub mod convert;

pub use client::{SessionContext, TradeClient};
pub use convert::RequestScope;
