use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Order/position volume in lots
pub type Volume = i32;

/// Instrument identifier as issued by the exchange (e.g. `rb2410`)
pub type InstrumentId = String;

/// Correlation token binding an outbound request to its asynchronous replies.
///
/// Positive values are issued sequentially by the gateway's allocator,
/// starting at 1. The negative sentinels [`CorrelationToken::CONNECT`] and
/// [`CorrelationToken::DISCONNECT`] are reserved for unsolicited session
/// lifecycle events and are never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationToken(i32);

impl CorrelationToken {
    /// Reserved token for the front-connected lifecycle event
    pub const CONNECT: Self = Self(-1);
    /// Reserved token for the front-disconnected lifecycle event
    pub const DISCONNECT: Self = Self(-2);

    /// Wrap a raw request id as received from the native session
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw request id passed to the native session
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Returns true for the two session lifecycle sentinels
    pub const fn is_reserved(self) -> bool {
        self.0 == Self::CONNECT.0 || self.0 == Self::DISCONNECT.0
    }

    /// Returns true for tokens in the allocator's range
    pub const fn is_allocated(self) -> bool {
        self.0 > 0
    }
}

impl From<i32> for CorrelationToken {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CorrelationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::CONNECT => write!(f, "connect"),
            Self::DISCONNECT => write!(f, "disconnect"),
            Self(raw) => write!(f, "#{}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_are_reserved() {
        assert!(CorrelationToken::CONNECT.is_reserved());
        assert!(CorrelationToken::DISCONNECT.is_reserved());
        assert!(!CorrelationToken::CONNECT.is_allocated());
        assert_ne!(CorrelationToken::CONNECT, CorrelationToken::DISCONNECT);
    }

    #[test]
    fn test_allocated_range() {
        let token = CorrelationToken::new(7);
        assert!(token.is_allocated());
        assert!(!token.is_reserved());
        assert!(!CorrelationToken::new(0).is_allocated());
    }

    #[test]
    fn test_display() {
        assert_eq!(CorrelationToken::new(42).to_string(), "#42");
        assert_eq!(CorrelationToken::CONNECT.to_string(), "connect");
        assert_eq!(CorrelationToken::DISCONNECT.to_string(), "disconnect");
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&CorrelationToken::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
