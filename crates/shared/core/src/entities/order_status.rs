use serde::{Deserialize, Serialize};

/// Order lifecycle status as reported by the trading front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order has been completely filled
    AllTraded,
    /// Partially filled, remainder still queueing
    PartTradedQueueing,
    /// Partially filled, remainder no longer queueing
    PartTradedNotQueueing,
    /// Resting on the book without fills
    NoTradeQueueing,
    /// Not filled and not on the book
    NoTradeNotQueueing,
    /// Order has been canceled
    Canceled,
    /// Accepted by the front, exchange state not known yet
    Unknown,
    /// Conditional order not yet triggered
    NotTouched,
    /// Conditional order triggered
    Touched,
}

impl OrderStatus {
    /// Returns true if the order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::AllTraded
                | OrderStatus::PartTradedNotQueueing
                | OrderStatus::NoTradeNotQueueing
                | OrderStatus::Canceled
        )
    }

    /// Returns true if the order is still working on the book
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::PartTradedQueueing | OrderStatus::NoTradeQueueing
        )
    }
}

/// Status of a parked order or parked cancel action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParkedOrderStatus {
    NotSend,
    Send,
    Deleted,
}
