use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Funds snapshot for an investor account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub investor_id: String,
    pub trading_day: String,
    pub deposit: Decimal,
    pub withdraw: Decimal,
    pub frozen_margin: Decimal,
    pub frozen_cash: Decimal,
    pub current_margin: Decimal,
    pub cash_in: Decimal,
    pub commission: Decimal,
    pub close_profit: Decimal,
    pub position_profit: Decimal,
    pub balance: Decimal,
    pub available: Decimal,
    pub withdraw_quota: Decimal,
}

/// Result of a successful login
///
/// `front_id`, `session_id` and `max_order_ref` identify the session and
/// must be echoed on later cancel requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInfo {
    pub investor_id: String,
    pub trading_day: String,
    pub login_time: String,
    pub front_id: i32,
    pub session_id: i32,
    pub max_order_ref: String,
}
