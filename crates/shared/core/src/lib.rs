//! tradewire Core Domain
//!
//! Pure domain types shared by the gateway engine, the native session port
//! and the simulated trading front.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    AccountInfo,
    ActionFlag,
    CancelOrderParameter,
    ContingentCondition,
    // Order enums
    Direction,
    ForceCloseReason,
    HedgeFlag,
    LoginInfo,
    OffsetFlag,
    // Records
    OrderInfo,
    OrderParameter,
    OrderPriceType,
    OrderStatus,
    ParkedCancelOrderInfo,
    ParkedOrderInfo,
    ParkedOrderStatus,
    PositionDate,
    PositionDirection,
    PositionInfo,
    PriceSource,
    Record,
    RecordKind,
    TimeCondition,
    TradeInfo,
    TradeType,
    VolumeCondition,
};
pub use values::{CorrelationToken, InstrumentId, Price, Volume};
