use serde::{Deserialize, Serialize};

/// Price instruction for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderPriceType {
    /// Execute at any price (market order)
    AnyPrice,
    /// Execute at specified price or better
    LimitPrice,
    /// Best price on the book
    BestPrice,
    /// Last traded price
    LastPrice,
}

impl OrderPriceType {
    /// Returns true if the order carries a meaningful limit price
    pub fn requires_price(&self) -> bool {
        matches!(self, OrderPriceType::LimitPrice)
    }
}

/// Validity window of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeCondition {
    /// Immediate or cancel
    IOC,
    /// Good for section
    GFS,
    /// Good for day
    GFD,
    /// Good till date
    GTD,
    /// Good till cancelled
    GTC,
    /// Good for auction
    GFA,
}

/// Volume instruction for partial fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeCondition {
    /// Any volume
    AV,
    /// At least the minimum volume
    MV,
    /// Complete volume only
    CV,
}

/// Trigger condition for conditional and parked orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContingentCondition {
    Immediately,
    Touch,
    TouchProfit,
    ParkedOrder,
    LastPriceGreaterThanStopPrice,
    LastPriceGreaterEqualStopPrice,
    LastPriceLesserThanStopPrice,
    LastPriceLesserEqualStopPrice,
}

/// Reason attached to a forced close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceCloseReason {
    NotForceClose,
    LackDeposit,
    ClientOverPositionLimit,
    MemberOverPositionLimit,
    NotMultiple,
    Violation,
    Other,
    PersonDeliv,
}

/// Action applied to an existing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionFlag {
    Delete,
    Modify,
}
