//! Domain parameters to native request fields
//!
//! Enum fields go through the exhaustive [`NativeCode`] tables; prices are
//! narrowed from `Decimal` to the native double.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tradewire_core::{CancelOrderParameter, OrderParameter};
use tradewire_ports::{
    InputOrderActionField, InputOrderField, NativeCode, ParkedOrderActionField, ParkedOrderField,
};

/// Identity stamped onto every outbound trading request
#[derive(Debug, Clone, Copy)]
pub struct RequestScope<'a> {
    pub broker_id: &'a str,
    pub investor_id: &'a str,
    pub front_id: i32,
    pub session_id: i32,
}

fn price(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub fn input_order(
    scope: RequestScope<'_>,
    order: &OrderParameter,
    order_ref: &str,
    request_id: i32,
) -> InputOrderField {
    InputOrderField {
        broker_id: scope.broker_id.to_string(),
        investor_id: scope.investor_id.to_string(),
        user_id: scope.investor_id.to_string(),
        instrument_id: order.instrument_id.clone(),
        exchange_id: order.exchange_id.clone(),
        order_ref: order_ref.to_string(),
        request_id,
        direction: order.direction.to_code(),
        order_price_type: order.price_type.to_code(),
        comb_offset_flag: order.offset_flag.to_code(),
        comb_hedge_flag: order.hedge_flag.to_code(),
        limit_price: price(order.price),
        stop_price: price(order.stop_price),
        volume_total_original: order.volume,
        min_volume: order.min_volume,
        time_condition: order.time_condition.to_code(),
        volume_condition: order.volume_condition.to_code(),
        contingent_condition: order.contingent_condition.to_code(),
        force_close_reason: order.force_close_reason.to_code(),
        gtd_date: order.gtd_date.clone(),
        is_auto_suspend: order.is_auto_suspend,
        user_force_close: order.user_force_close,
    }
}

pub fn order_action(
    scope: RequestScope<'_>,
    cancel: &CancelOrderParameter,
    request_id: i32,
) -> InputOrderActionField {
    InputOrderActionField {
        broker_id: scope.broker_id.to_string(),
        investor_id: scope.investor_id.to_string(),
        user_id: scope.investor_id.to_string(),
        instrument_id: cancel.instrument_id.clone(),
        exchange_id: cancel.exchange_id.clone(),
        order_action_ref: cancel.order_action_ref,
        order_ref: cancel.order_ref.clone(),
        order_sys_id: cancel.order_sys_id.clone(),
        request_id,
        front_id: scope.front_id,
        session_id: scope.session_id,
        action_flag: cancel.action_flag.to_code(),
        limit_price: price(cancel.price),
        volume_change: cancel.volume_change,
    }
}

pub fn parked_order(
    scope: RequestScope<'_>,
    order: &OrderParameter,
    order_ref: &str,
    request_id: i32,
) -> ParkedOrderField {
    ParkedOrderField {
        broker_id: scope.broker_id.to_string(),
        investor_id: scope.investor_id.to_string(),
        user_id: scope.investor_id.to_string(),
        instrument_id: order.instrument_id.clone(),
        exchange_id: order.exchange_id.clone(),
        order_ref: order_ref.to_string(),
        parked_order_id: order.parked_order_id.clone(),
        request_id,
        direction: order.direction.to_code(),
        order_price_type: order.price_type.to_code(),
        comb_offset_flag: order.offset_flag.to_code(),
        comb_hedge_flag: order.hedge_flag.to_code(),
        limit_price: price(order.price),
        stop_price: price(order.stop_price),
        volume_total_original: order.volume,
        min_volume: order.min_volume,
        time_condition: order.time_condition.to_code(),
        volume_condition: order.volume_condition.to_code(),
        contingent_condition: order.contingent_condition.to_code(),
        gtd_date: order.gtd_date.clone(),
        is_auto_suspend: order.is_auto_suspend,
        user_force_close: order.user_force_close,
    }
}

pub fn parked_order_action(
    scope: RequestScope<'_>,
    cancel: &CancelOrderParameter,
    request_id: i32,
) -> ParkedOrderActionField {
    ParkedOrderActionField {
        broker_id: scope.broker_id.to_string(),
        investor_id: scope.investor_id.to_string(),
        user_id: scope.investor_id.to_string(),
        instrument_id: cancel.instrument_id.clone(),
        exchange_id: cancel.exchange_id.clone(),
        order_action_ref: cancel.order_action_ref,
        order_ref: cancel.order_ref.clone(),
        order_sys_id: cancel.order_sys_id.clone(),
        parked_order_action_id: cancel.parked_order_action_id.clone(),
        request_id,
        front_id: scope.front_id,
        session_id: scope.session_id,
        action_flag: cancel.action_flag.to_code(),
        status: cancel.status.to_code(),
    }
}
