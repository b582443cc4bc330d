//! tradewire Gateway
//!
//! Request correlation and response aggregation over a single asynchronous
//! trade session. Provides:
//! - Token allocation and the pending call registry
//! - Aggregation of streamed list replies
//! - A dispatcher that fires each continuation exactly once
//! - [`TradeClient`], the synchronous call-style API
//!
//! ## Architecture
//!
//! ```text
//!  caller threads                         session delivery context
//!  ──────────────                         ────────────────────────
//!  TradeClient::query_order(cb)
//!     │ allocate token
//!     │ register(token, cb) ──┐
//!     │ session.query_order   │    ┌──────────────┐
//!     ▼                       └───►│   Pending    │◄── take(token)
//!  returns token                   │   Calls      │        ▲
//!                                  └──────────────┘        │
//!                                  ┌──────────────┐   ┌────┴──────┐
//!        DeliveryEvent channel ───►│  Dispatcher  ├──►│Aggregator │
//!                                  └──────────────┘   └───────────┘
//! ```
//!
//! Protocol failures never surface as Rust errors: they reach the caller as
//! a failure [`ResultEnvelope`] through the continuation. [`GatewayError`]
//! is reserved for synchronous issue-time problems.

pub mod adapters;
pub mod config;
pub mod correlation;
pub mod dispatcher;
pub mod error;
pub mod messages;

// Re-export commonly used types
pub use adapters::{SessionContext, TradeClient};
pub use config::GatewayConfig;
pub use correlation::{PendingCallRegistry, ResponseAggregator, TokenAllocator};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{ConfigError, GatewayError, Result};
pub use messages::{
    Completion, Continuation, DataResult, ERROR_PAYLOAD_MISMATCH, ListResult, ResultEnvelope,
    RspError, UnitResult,
};
