//! Native single-byte codes for domain enums
//!
//! Each table lists every variant exactly once. `to_code` is an exhaustive
//! match, so adding a domain variant without a native code fails to compile;
//! `from_code` rejects bytes the table does not know.

use crate::error::CodeError;
use tradewire_core::{
    ActionFlag, ContingentCondition, Direction, ForceCloseReason, HedgeFlag, OffsetFlag,
    OrderPriceType, OrderStatus, ParkedOrderStatus, PositionDate, PositionDirection, PriceSource,
    TimeCondition, TradeType, VolumeCondition,
};

/// Conversion between a domain enum and its native byte code
pub trait NativeCode: Sized + Copy {
    /// Name used in conversion errors
    const KIND: &'static str;

    fn to_code(self) -> u8;

    fn from_code(code: u8) -> Result<Self, CodeError>;
}

macro_rules! native_codes {
    ($($ty:ident { $($variant:ident => $code:literal),+ $(,)? })+) => {
        $(
            impl NativeCode for $ty {
                const KIND: &'static str = stringify!($ty);

                fn to_code(self) -> u8 {
                    match self {
                        $($ty::$variant => $code,)+
                    }
                }

                fn from_code(code: u8) -> Result<Self, CodeError> {
                    match code {
                        $($code => Ok($ty::$variant),)+
                        other => Err(CodeError::Unknown { kind: Self::KIND, code: other }),
                    }
                }
            }
        )+
    };
}

native_codes! {
    Direction {
        Buy => b'0',
        Sell => b'1',
    }
    OffsetFlag {
        Open => b'0',
        Close => b'1',
        ForceClose => b'2',
        CloseToday => b'3',
        CloseYesterday => b'4',
        ForceOff => b'5',
        LocalForceClose => b'6',
    }
    HedgeFlag {
        Speculation => b'1',
        Arbitrage => b'2',
        Hedge => b'3',
    }
    OrderPriceType {
        AnyPrice => b'1',
        LimitPrice => b'2',
        BestPrice => b'3',
        LastPrice => b'4',
    }
    TimeCondition {
        IOC => b'1',
        GFS => b'2',
        GFD => b'3',
        GTD => b'4',
        GTC => b'5',
        GFA => b'6',
    }
    VolumeCondition {
        AV => b'1',
        MV => b'2',
        CV => b'3',
    }
    ContingentCondition {
        Immediately => b'1',
        Touch => b'2',
        TouchProfit => b'3',
        ParkedOrder => b'4',
        LastPriceGreaterThanStopPrice => b'5',
        LastPriceGreaterEqualStopPrice => b'6',
        LastPriceLesserThanStopPrice => b'7',
        LastPriceLesserEqualStopPrice => b'8',
    }
    ForceCloseReason {
        NotForceClose => b'0',
        LackDeposit => b'1',
        ClientOverPositionLimit => b'2',
        MemberOverPositionLimit => b'3',
        NotMultiple => b'4',
        Violation => b'5',
        Other => b'6',
        PersonDeliv => b'7',
    }
    ActionFlag {
        Delete => b'0',
        Modify => b'3',
    }
    OrderStatus {
        AllTraded => b'0',
        PartTradedQueueing => b'1',
        PartTradedNotQueueing => b'2',
        NoTradeQueueing => b'3',
        NoTradeNotQueueing => b'4',
        Canceled => b'5',
        Unknown => b'a',
        NotTouched => b'b',
        Touched => b'c',
    }
    ParkedOrderStatus {
        NotSend => b'1',
        Send => b'2',
        Deleted => b'3',
    }
    TradeType {
        Common => b'0',
        OptionsExecution => b'1',
        OTC => b'2',
        EFPDerived => b'3',
        CombinationDerived => b'4',
    }
    PriceSource {
        LastPrice => b'0',
        Buy => b'1',
        Sell => b'2',
    }
    PositionDirection {
        Net => b'1',
        Long => b'2',
        Short => b'3',
    }
    PositionDate {
        Today => b'1',
        History => b'2',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Direction::Sell.to_code(), b'1');
        assert_eq!(OrderStatus::from_code(b'a').unwrap(), OrderStatus::Unknown);
        assert_eq!(ActionFlag::Modify.to_code(), b'3');
        assert_eq!(
            OrderPriceType::from_code(b'2').unwrap(),
            OrderPriceType::LimitPrice
        );
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = HedgeFlag::from_code(b'9').unwrap_err();
        assert_eq!(
            err,
            CodeError::Unknown {
                kind: "HedgeFlag",
                code: b'9'
            }
        );
        assert!(err.to_string().contains("HedgeFlag"));
    }

    #[test]
    fn test_action_flag_gap_is_not_decoded() {
        // Native codes 1 and 2 are not action flags
        assert!(ActionFlag::from_code(b'1').is_err());
        assert!(ActionFlag::from_code(b'2').is_err());
    }
}
