use thiserror::Error;

use crate::core::types::Action;

#[derive(Error, Debug)]
pub enum ArenaError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("{fighter} cannot {action}: {reason}")]
    InsufficientResource {
        fighter: String,
        action: Action,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArenaError>;
