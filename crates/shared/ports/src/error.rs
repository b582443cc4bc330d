use thiserror::Error;

/// Unknown native code in a conversion table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Unknown {kind} code: {code:#04x}")]
    Unknown { kind: &'static str, code: u8 },
}

/// Errors raised synchronously by a native session when a request is issued
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Not connected to trading front")]
    NotConnected,

    #[error("Request refused by session: code={code}, message={message}")]
    Rejected { code: i32, message: String },

    #[error("Delivery channel closed")]
    Closed,

    #[error("Conversion failed: {0}")]
    Code(#[from] CodeError),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
