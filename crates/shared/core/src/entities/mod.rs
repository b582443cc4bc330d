mod account;
mod order;
mod order_status;
mod order_type;
mod parameters;
mod parked;
mod position;
mod record;
mod side;
mod trade;

pub use account::{AccountInfo, LoginInfo};
pub use order::OrderInfo;
pub use order_status::{OrderStatus, ParkedOrderStatus};
pub use order_type::{
    ActionFlag, ContingentCondition, ForceCloseReason, OrderPriceType, TimeCondition,
    VolumeCondition,
};
pub use parameters::{CancelOrderParameter, OrderParameter};
pub use parked::{ParkedCancelOrderInfo, ParkedOrderInfo};
pub use position::{PositionDate, PositionDirection, PositionInfo};
pub use record::{Record, RecordKind};
pub use side::{Direction, HedgeFlag, OffsetFlag};
pub use trade::{PriceSource, TradeInfo, TradeType};
