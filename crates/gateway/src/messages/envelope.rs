use serde::{Deserialize, Serialize};
use tradewire_ports::RspInfo;

/// Local error code used when a delivered payload does not match the
/// shape or record type the caller registered for
pub const ERROR_PAYLOAD_MISMATCH: i32 = -900;

/// Native error code and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RspError {
    pub code: i32,
    pub message: String,
}

impl RspError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<RspInfo> for RspError {
    fn from(info: RspInfo) -> Self {
        Self {
            code: info.error_id,
            message: info.error_msg,
        }
    }
}

/// Outcome of one call, handed to its continuation
///
/// Success carries an optional payload and no error fields; failure carries
/// a code and message and never a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub is_success: bool,
    pub error_code: Option<i32>,
    pub error_message: Option<String>,
    pub payload: Option<T>,
}

/// Result with no payload
pub type UnitResult = ResultEnvelope<()>;

/// Result with a single payload
pub type DataResult<T> = ResultEnvelope<T>;

/// Result with an ordered list of records
pub type ListResult<T> = ResultEnvelope<Vec<T>>;

impl<T> ResultEnvelope<T> {
    pub fn success(payload: T) -> Self {
        Self {
            is_success: true,
            error_code: None,
            error_message: None,
            payload: Some(payload),
        }
    }

    /// Success with no payload (e.g. an acknowledged request with no reply body)
    pub fn success_empty() -> Self {
        Self {
            is_success: true,
            error_code: None,
            error_message: None,
            payload: None,
        }
    }

    pub fn failure(code: i32, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            error_code: Some(code),
            error_message: Some(message.into()),
            payload: None,
        }
    }

    /// The error carried by a failure envelope
    pub fn error(&self) -> Option<RspError> {
        if self.is_success {
            return None;
        }
        Some(RspError {
            code: self.error_code.unwrap_or_default(),
            message: self.error_message.clone().unwrap_or_default(),
        })
    }

    pub fn into_result(self) -> Result<Option<T>, RspError> {
        if self.is_success {
            Ok(self.payload)
        } else {
            Err(RspError {
                code: self.error_code.unwrap_or_default(),
                message: self.error_message.unwrap_or_default(),
            })
        }
    }

    /// Transform the payload, keeping success/failure and error fields
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResultEnvelope<U> {
        ResultEnvelope {
            is_success: self.is_success,
            error_code: self.error_code,
            error_message: self.error_message,
            payload: self.payload.map(f),
        }
    }
}

impl<T> From<RspError> for ResultEnvelope<T> {
    fn from(error: RspError) -> Self {
        Self::failure(error.code, error.message)
    }
}
