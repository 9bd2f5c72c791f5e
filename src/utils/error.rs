// src/utils/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parse error: no numeric components in {0:?}")]
    VersionParse(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Environment error: {0}")]
    Environment(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
