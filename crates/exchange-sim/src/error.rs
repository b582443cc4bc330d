use thiserror::Error;
use tradewire_ports::RspInfo;

/// Request failures reported back to the client as native error info
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("Invalid login: {0}")]
    InvalidLogin(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Old password mismatch")]
    PasswordMismatch,

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Instrument not found: {0}")]
    InstrumentNotFound(String),

    #[error("Duplicate order ref: {0}")]
    DuplicateOrder(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order already closed: {0}")]
    OrderClosed(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl SimError {
    /// Native error id reported for this failure
    pub fn error_id(&self) -> i32 {
        match self {
            SimError::InvalidLogin(_) => 3,
            SimError::NotLoggedIn => 4,
            SimError::InvalidOrder(_) => 15,
            SimError::InstrumentNotFound(_) => 16,
            SimError::DuplicateOrder(_) => 22,
            SimError::OrderNotFound(_) => 25,
            SimError::OrderClosed(_) => 26,
            SimError::PasswordMismatch => 131,
            SimError::Config(_) => -1,
        }
    }
}

impl From<SimError> for RspInfo {
    fn from(err: SimError) -> Self {
        RspInfo::new(err.error_id(), err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsp_info_from_error() {
        let info = RspInfo::from(SimError::InstrumentNotFound("zz9999".to_string()));
        assert_eq!(info.error_id, 16);
        assert!(info.error_msg.contains("zz9999"));
        assert!(info.is_error());
    }
}
