//! exchange-sim
//!
//! In-process simulated trading front. Implements the native
//! [`TradeSession`](tradewire_ports::TradeSession) port: requests are answered
//! with [`DeliveryEvent`](tradewire_ports::DeliveryEvent)s on the connection's
//! event channel, either immediately or held back and released later
//! (optionally interleaved at random) to exercise out-of-order delivery.

// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::{Ledger, SimFront};
pub use error::{Result, SimError};
pub use infrastructure::{DeliveryMode, EventSink, SimClock};
pub use model::{SimAccount, SimConfig, SimInstrument};
