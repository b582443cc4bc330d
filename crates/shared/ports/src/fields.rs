//! Native request shapes
//!
//! Flat structs mirroring what the native session expects on the wire.
//! Enum-valued fields carry native byte codes (see [`crate::NativeCode`]),
//! prices are plain doubles.

/// Login request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginField {
    pub broker_id: String,
    pub user_id: String,
    pub password: String,
}

/// Logout request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogoutField {
    pub broker_id: String,
    pub user_id: String,
}

/// Password change request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordUpdateField {
    pub broker_id: String,
    pub user_id: String,
    pub old_password: String,
    pub new_password: String,
}

/// Scope of a query: every query is per broker and investor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryField {
    pub broker_id: String,
    pub investor_id: String,
}

/// Order insert request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOrderField {
    pub broker_id: String,
    pub investor_id: String,
    pub user_id: String,
    pub instrument_id: String,
    pub exchange_id: String,
    pub order_ref: String,
    pub request_id: i32,
    pub direction: u8,
    pub order_price_type: u8,
    pub comb_offset_flag: u8,
    pub comb_hedge_flag: u8,
    pub limit_price: f64,
    pub stop_price: f64,
    pub volume_total_original: i32,
    pub min_volume: i32,
    pub time_condition: u8,
    pub volume_condition: u8,
    pub contingent_condition: u8,
    pub force_close_reason: u8,
    pub gtd_date: String,
    pub is_auto_suspend: bool,
    pub user_force_close: bool,
}

/// Order action (cancel/modify) request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputOrderActionField {
    pub broker_id: String,
    pub investor_id: String,
    pub user_id: String,
    pub instrument_id: String,
    pub exchange_id: String,
    pub order_action_ref: i32,
    pub order_ref: String,
    pub order_sys_id: String,
    pub request_id: i32,
    pub front_id: i32,
    pub session_id: i32,
    pub action_flag: u8,
    pub limit_price: f64,
    pub volume_change: i32,
}

/// Parked order insert request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParkedOrderField {
    pub broker_id: String,
    pub investor_id: String,
    pub user_id: String,
    pub instrument_id: String,
    pub exchange_id: String,
    pub order_ref: String,
    pub parked_order_id: String,
    pub request_id: i32,
    pub direction: u8,
    pub order_price_type: u8,
    pub comb_offset_flag: u8,
    pub comb_hedge_flag: u8,
    pub limit_price: f64,
    pub stop_price: f64,
    pub volume_total_original: i32,
    pub min_volume: i32,
    pub time_condition: u8,
    pub volume_condition: u8,
    pub contingent_condition: u8,
    pub gtd_date: String,
    pub is_auto_suspend: bool,
    pub user_force_close: bool,
}

/// Parked order action request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParkedOrderActionField {
    pub broker_id: String,
    pub investor_id: String,
    pub user_id: String,
    pub instrument_id: String,
    pub exchange_id: String,
    pub order_action_ref: i32,
    pub order_ref: String,
    pub order_sys_id: String,
    pub parked_order_action_id: String,
    pub request_id: i32,
    pub front_id: i32,
    pub session_id: i32,
    pub action_flag: u8,
    pub status: u8,
}
