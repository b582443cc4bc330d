//! Request correlation
//!
//! Token allocation, the pending call registry and the response aggregator.
//! All three are non-blocking and safe to share between caller threads and
//! the delivery context.

mod aggregator;
mod registry;
mod token;

pub use aggregator::ResponseAggregator;
pub use registry::PendingCallRegistry;
pub use token::TokenAllocator;
