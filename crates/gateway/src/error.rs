//! Error types for the gateway crate

use thiserror::Error;
use tradewire_core::CorrelationToken;
use tradewire_ports::SessionError;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Gateway-level errors returned synchronously from fire operations
///
/// Protocol failures never show up here; they reach the caller as a
/// failure envelope through the continuation.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Correlation token space exhausted")]
    TokenSpaceExhausted,

    #[error("Token {0} already has a pending call")]
    DuplicateToken(CorrelationToken),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Not logged in")]
    NotLoggedIn,
}

pub type Result<T> = std::result::Result<T, GatewayError>;
