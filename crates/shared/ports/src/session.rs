use crate::error::SessionResult;
use crate::fields::{
    InputOrderActionField, InputOrderField, LoginField, LogoutField, ParkedOrderActionField,
    ParkedOrderField, PasswordUpdateField, QueryField,
};
use tradewire_core::CorrelationToken;

/// Port for a native trade session
///
/// Every request method is fire-and-forget: it hands the request to the
/// native layer and returns as soon as the request has been accepted for
/// sending. The outcome arrives later as one or more
/// [`DeliveryEvent`](crate::DeliveryEvent)s carrying `token`.
///
/// Implementations must be callable from any caller thread.
pub trait TradeSession: Send + Sync {
    /// Open the front connection; completion is signalled by
    /// [`SessionEvent::Connected`](crate::SessionEvent::Connected)
    fn connect(&self, broker_id: &str, front_address: &str) -> SessionResult<()>;

    /// Close the front connection; completion is signalled by
    /// [`SessionEvent::Disconnected`](crate::SessionEvent::Disconnected)
    fn disconnect(&self) -> SessionResult<()>;

    /// Current trading day as known to the session, `YYYYMMDD`
    fn trading_day(&self) -> String;

    fn user_login(&self, token: CorrelationToken, req: &LoginField) -> SessionResult<()>;

    fn user_logout(&self, token: CorrelationToken, req: &LogoutField) -> SessionResult<()>;

    fn update_user_password(
        &self,
        token: CorrelationToken,
        req: &PasswordUpdateField,
    ) -> SessionResult<()>;

    fn order_insert(&self, token: CorrelationToken, req: &InputOrderField) -> SessionResult<()>;

    fn order_action(
        &self,
        token: CorrelationToken,
        req: &InputOrderActionField,
    ) -> SessionResult<()>;

    fn parked_order_insert(
        &self,
        token: CorrelationToken,
        req: &ParkedOrderField,
    ) -> SessionResult<()>;

    fn parked_order_action(
        &self,
        token: CorrelationToken,
        req: &ParkedOrderActionField,
    ) -> SessionResult<()>;

    fn query_trading_account(&self, token: CorrelationToken, req: &QueryField)
    -> SessionResult<()>;

    fn query_order(&self, token: CorrelationToken, req: &QueryField) -> SessionResult<()>;

    fn query_trade(&self, token: CorrelationToken, req: &QueryField) -> SessionResult<()>;

    fn query_investor_position(
        &self,
        token: CorrelationToken,
        req: &QueryField,
    ) -> SessionResult<()>;

    fn query_parked_order(&self, token: CorrelationToken, req: &QueryField) -> SessionResult<()>;

    fn query_parked_order_action(
        &self,
        token: CorrelationToken,
        req: &QueryField,
    ) -> SessionResult<()>;
}
