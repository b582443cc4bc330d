//! Type-erased payload carried by delivery events

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    AccountInfo, LoginInfo, OrderInfo, ParkedCancelOrderInfo, ParkedOrderInfo, PositionInfo,
    TradeInfo,
};

/// Discriminant of a [`Record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Login,
    Account,
    Order,
    Trade,
    Position,
    ParkedOrder,
    ParkedCancelOrder,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Login => "login",
            RecordKind::Account => "account",
            RecordKind::Order => "order",
            RecordKind::Trade => "trade",
            RecordKind::Position => "position",
            RecordKind::ParkedOrder => "parked_order",
            RecordKind::ParkedCancelOrder => "parked_cancel_order",
        };
        f.write_str(name)
    }
}

/// Any domain record a session can deliver
///
/// Continuations are stored type-erased; the concrete record type is
/// recovered with `TryFrom<Record>`, which hands the record back on a
/// kind mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Login(LoginInfo),
    Account(AccountInfo),
    Order(OrderInfo),
    Trade(TradeInfo),
    Position(PositionInfo),
    ParkedOrder(ParkedOrderInfo),
    ParkedCancelOrder(ParkedCancelOrderInfo),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Login(_) => RecordKind::Login,
            Record::Account(_) => RecordKind::Account,
            Record::Order(_) => RecordKind::Order,
            Record::Trade(_) => RecordKind::Trade,
            Record::Position(_) => RecordKind::Position,
            Record::ParkedOrder(_) => RecordKind::ParkedOrder,
            Record::ParkedCancelOrder(_) => RecordKind::ParkedCancelOrder,
        }
    }
}

macro_rules! record_variant {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(value: $ty) -> Self {
                    Record::$variant(value)
                }
            }

            impl TryFrom<Record> for $ty {
                type Error = Record;

                fn try_from(record: Record) -> Result<Self, Self::Error> {
                    match record {
                        Record::$variant(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

record_variant! {
    LoginInfo => Login,
    AccountInfo => Account,
    OrderInfo => Order,
    TradeInfo => Trade,
    PositionInfo => Position,
    ParkedOrderInfo => ParkedOrder,
    ParkedCancelOrderInfo => ParkedCancelOrder,
}
