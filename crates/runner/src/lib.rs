//! Tradewire Runner - scripted trading session
//!
//! Drives one complete session through the gateway against the simulated
//! front:
//!
//! ```text
//! ┌──────────────┐   typed calls    ┌──────────────┐   native requests   ┌──────────────┐
//! │ Script       │ ───────────────▶ │ TradeClient  │ ──────────────────▶ │ SimFront     │
//! │ (session.rs) │ ◀─ continuations │ + Dispatcher │ ◀── event channel ─ │              │
//! └──────────────┘                  └──────────────┘                     └──────────────┘
//! ```
//!
//! The script connects, logs in, places a ladder of limit orders plus one
//! market order, cancels the first resting order, runs the account and
//! order queries (optionally with out-of-order delivery), then logs out and
//! disconnects.

pub mod config;
pub mod error;
pub mod session;

pub use config::{RunnerConfig, ScriptConfig};
pub use error::{Result, RunnerError};
pub use session::{SessionReport, run_session};
