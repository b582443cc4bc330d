use serde::{Deserialize, Serialize};

/// Order direction (Buy or Sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Returns the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Buy => Direction::Sell,
            Direction::Sell => Direction::Buy,
        }
    }
}

/// Open/close instruction carried on every futures order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffsetFlag {
    Open,
    Close,
    ForceClose,
    CloseToday,
    CloseYesterday,
    ForceOff,
    LocalForceClose,
}

impl OffsetFlag {
    /// Returns true if the flag opens new exposure
    pub fn is_open(&self) -> bool {
        matches!(self, OffsetFlag::Open)
    }
}

/// Speculation/hedge classification of an order or position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HedgeFlag {
    Speculation,
    Arbitrage,
    Hedge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_direction() {
        assert_eq!(Direction::Buy.opposite(), Direction::Sell);
        assert_eq!(Direction::Sell.opposite(), Direction::Buy);
    }

    #[test]
    fn test_offset_is_open() {
        assert!(OffsetFlag::Open.is_open());
        assert!(!OffsetFlag::CloseToday.is_open());
    }
}
