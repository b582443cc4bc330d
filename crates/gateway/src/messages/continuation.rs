use super::envelope::{ERROR_PAYLOAD_MISMATCH, ListResult, ResultEnvelope, RspError, UnitResult};
use std::fmt;
use tradewire_core::{Record, RecordKind};

/// Payload produced by the dispatcher for a resolved token
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Unary reply, with or without a record
    Single(Option<Record>),
    /// Finalized stream, records in arrival order
    List(Vec<Record>),
}

type UnitFn = Box<dyn FnOnce(UnitResult) + Send>;
type SingleFn = Box<dyn FnOnce(ResultEnvelope<Record>) + Send>;
type ListFn = Box<dyn FnOnce(ListResult<Record>) + Send>;

/// Caller-supplied completion, stored type-erased in the registry
///
/// Typed callbacks are wrapped at registration; the record type is checked
/// when the continuation fires, and a mismatch resolves the call as a
/// failure with [`ERROR_PAYLOAD_MISMATCH`] instead of panicking.
pub enum Continuation {
    Unit(UnitFn),
    Single(SingleFn),
    List(ListFn),
}

impl Continuation {
    /// No-payload continuation
    pub fn unit(f: impl FnOnce(UnitResult) + Send + 'static) -> Self {
        Continuation::Unit(Box::new(f))
    }

    /// Single-payload continuation for records of type `T`
    pub fn single<T>(f: impl FnOnce(ResultEnvelope<T>) + Send + 'static) -> Self
    where
        T: TryFrom<Record, Error = Record> + 'static,
    {
        Continuation::Single(Box::new(move |result: ResultEnvelope<Record>| {
            f(narrow_single(result))
        }))
    }

    /// Ordered-list continuation for records of type `T`
    pub fn list<T>(f: impl FnOnce(ListResult<T>) + Send + 'static) -> Self
    where
        T: TryFrom<Record, Error = Record> + 'static,
    {
        Continuation::List(Box::new(move |result: ListResult<Record>| {
            f(narrow_list(result))
        }))
    }

    /// Shape name, for logging
    pub fn shape(&self) -> &'static str {
        match self {
            Continuation::Unit(_) => "unit",
            Continuation::Single(_) => "single",
            Continuation::List(_) => "list",
        }
    }

    /// Fire the continuation with the outcome of its call
    pub fn resolve(self, outcome: Result<Completion, RspError>) {
        match self {
            Continuation::Unit(f) => f(match outcome {
                Ok(_) => ResultEnvelope::success_empty(),
                Err(e) => e.into(),
            }),
            Continuation::Single(f) => f(match outcome {
                Ok(Completion::Single(Some(record))) => ResultEnvelope::success(record),
                Ok(Completion::Single(None)) => ResultEnvelope::success_empty(),
                Ok(Completion::List(_)) => shape_mismatch("single", "list"),
                Err(e) => e.into(),
            }),
            Continuation::List(f) => f(match outcome {
                Ok(Completion::List(records)) => ResultEnvelope::success(records),
                Ok(Completion::Single(_)) => shape_mismatch("list", "single"),
                Err(e) => e.into(),
            }),
        }
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Continuation::{}", self.shape())
    }
}

fn shape_mismatch<T>(expected: &str, got: &str) -> ResultEnvelope<T> {
    ResultEnvelope::failure(
        ERROR_PAYLOAD_MISMATCH,
        format!("expected {} reply, got {}", expected, got),
    )
}

fn kind_mismatch<T>(got: RecordKind) -> ResultEnvelope<T> {
    ResultEnvelope::failure(
        ERROR_PAYLOAD_MISMATCH,
        format!("unexpected {} record", got),
    )
}

fn narrow_single<T>(result: ResultEnvelope<Record>) -> ResultEnvelope<T>
where
    T: TryFrom<Record, Error = Record>,
{
    if !result.is_success {
        return failed(result);
    }
    match result.payload {
        None => ResultEnvelope::success_empty(),
        Some(record) => match T::try_from(record) {
            Ok(value) => ResultEnvelope::success(value),
            Err(other) => kind_mismatch(other.kind()),
        },
    }
}

fn narrow_list<T>(result: ListResult<Record>) -> ListResult<T>
where
    T: TryFrom<Record, Error = Record>,
{
    if !result.is_success {
        return failed(result);
    }
    let records = result.payload.unwrap_or_default();
    let mut narrowed = Vec::with_capacity(records.len());
    for record in records {
        match T::try_from(record) {
            Ok(value) => narrowed.push(value),
            Err(other) => return kind_mismatch(other.kind()),
        }
    }
    ResultEnvelope::success(narrowed)
}

fn failed<T, U>(result: ResultEnvelope<T>) -> ResultEnvelope<U> {
    ResultEnvelope {
        is_success: false,
        error_code: result.error_code,
        error_message: result.error_message,
        payload: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::{Arc, Mutex};
    use tradewire_core::{AccountInfo, LoginInfo};

    fn login(session_id: i32) -> LoginInfo {
        LoginInfo {
            investor_id: "0001".to_string(),
            trading_day: "20240102".to_string(),
            login_time: "08:55:00".to_string(),
            front_id: 1,
            session_id,
            max_order_ref: "0".to_string(),
        }
    }

    fn account() -> AccountInfo {
        AccountInfo {
            investor_id: "0001".to_string(),
            trading_day: "20240102".to_string(),
            deposit: Decimal::ZERO,
            withdraw: Decimal::ZERO,
            frozen_margin: Decimal::ZERO,
            frozen_cash: Decimal::ZERO,
            current_margin: Decimal::ZERO,
            cash_in: Decimal::ZERO,
            commission: Decimal::ZERO,
            close_profit: Decimal::ZERO,
            position_profit: Decimal::ZERO,
            balance: Decimal::from(1_000_000),
            available: Decimal::from(1_000_000),
            withdraw_quota: Decimal::ZERO,
        }
    }

    fn capture<T: Send + 'static>() -> (Arc<Mutex<Option<T>>>, impl FnOnce(T) + Send + 'static) {
        let slot = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&slot);
        (slot, move |value| *sink.lock().unwrap() = Some(value))
    }

    #[test]
    fn test_single_narrows_record() {
        let (slot, sink) = capture::<ResultEnvelope<LoginInfo>>();
        Continuation::single(sink).resolve(Ok(Completion::Single(Some(login(42).into()))));

        let result = slot.lock().unwrap().take().unwrap();
        assert!(result.is_success);
        assert_eq!(result.payload.unwrap().session_id, 42);
    }

    #[test]
    fn test_single_kind_mismatch_is_failure() {
        let (slot, sink) = capture::<ResultEnvelope<LoginInfo>>();
        Continuation::single(sink).resolve(Ok(Completion::Single(Some(account().into()))));

        let result = slot.lock().unwrap().take().unwrap();
        assert!(!result.is_success);
        assert_eq!(result.error_code, Some(ERROR_PAYLOAD_MISMATCH));
        assert!(result.error_message.unwrap().contains("account"));
    }

    #[test]
    fn test_single_without_record_is_empty_success() {
        let (slot, sink) = capture::<ResultEnvelope<AccountInfo>>();
        Continuation::single(sink).resolve(Ok(Completion::Single(None)));

        let result = slot.lock().unwrap().take().unwrap();
        assert!(result.is_success);
        assert!(result.payload.is_none());
    }

    #[test]
    fn test_list_preserves_order() {
        let (slot, sink) = capture::<ListResult<LoginInfo>>();
        let records = vec![login(1).into(), login(2).into(), login(3).into()];
        Continuation::list(sink).resolve(Ok(Completion::List(records)));

        let result = slot.lock().unwrap().take().unwrap();
        let ids: Vec<i32> = result.payload.unwrap().iter().map(|l| l.session_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_list_with_foreign_record_is_failure() {
        let (slot, sink) = capture::<ListResult<LoginInfo>>();
        let records = vec![login(1).into(), account().into()];
        Continuation::list(sink).resolve(Ok(Completion::List(records)));

        let result = slot.lock().unwrap().take().unwrap();
        assert!(!result.is_success);
        assert!(result.payload.is_none());
    }

    #[test]
    fn test_shape_mismatch() {
        let (slot, sink) = capture::<ListResult<LoginInfo>>();
        Continuation::list(sink).resolve(Ok(Completion::Single(None)));
        let result = slot.lock().unwrap().take().unwrap();
        assert_eq!(result.error_code, Some(ERROR_PAYLOAD_MISMATCH));

        let (slot, sink) = capture::<ResultEnvelope<LoginInfo>>();
        Continuation::single(sink).resolve(Ok(Completion::List(vec![])));
        let result = slot.lock().unwrap().take().unwrap();
        assert_eq!(result.error_code, Some(ERROR_PAYLOAD_MISMATCH));
    }

    #[test]
    fn test_unit_ignores_payload() {
        let (slot, sink) = capture::<UnitResult>();
        Continuation::unit(sink).resolve(Ok(Completion::Single(Some(login(1).into()))));
        assert!(slot.lock().unwrap().take().unwrap().is_success);
    }

    #[test]
    fn test_error_reaches_every_shape() {
        let error = RspError::new(25, "order not found");

        let (unit, sink) = capture::<UnitResult>();
        Continuation::unit(sink).resolve(Err(error.clone()));
        assert_eq!(unit.lock().unwrap().take().unwrap().error_code, Some(25));

        let (list, sink) = capture::<ListResult<LoginInfo>>();
        Continuation::list(sink).resolve(Err(error));
        let result = list.lock().unwrap().take().unwrap();
        assert_eq!(result.error_message.as_deref(), Some("order not found"));
        assert!(result.payload.is_none());
    }

    #[test]
    fn test_debug_shows_shape() {
        let continuation = Continuation::unit(|_| {});
        assert_eq!(format!("{:?}", continuation), "Continuation::unit");
    }
}
