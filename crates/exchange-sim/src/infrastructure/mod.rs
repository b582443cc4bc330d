mod delivery;
pub mod time;

pub use delivery::{DeliveryMode, EventSink};
pub use time::SimClock;
