use exchange_sim::SimError;
use thiserror::Error;
use tradewire_gateway::{ConfigError, GatewayError};
use tradewire_ports::SessionError;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Simulator error: {0}")]
    Simulator(#[from] SimError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("{operation} failed: code={code}, message={message}")]
    Call {
        operation: &'static str,
        code: i32,
        message: String,
    },

    #[error("{0} timed out")]
    Timeout(&'static str),

    #[error("{0} continuation dropped without firing")]
    Abandoned(&'static str),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
