//! Error types for configuration and session control

use thiserror::Error;

use crate::session::LifecyclePhase;

/// Broken install or preference data. Fatal at startup, never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Not enough color stops for pressure gauge: need at least 2, got {0}")]
    NotEnoughColorStops(usize),
    #[error("Color stop positions must be strictly increasing (stop {index} at {position})")]
    UnorderedColorStops { index: usize, position: f32 },
    #[error("Ball color palette is empty")]
    EmptyBallPalette,
    #[error("Achievement text table is empty")]
    EmptyAchievementTexts,
    #[error("Asset source path is missing")]
    MissingAssetPath,
    #[error("Invalid color string: {0}")]
    InvalidColor(String),
    #[error("Settings I/O error: {0}")]
    Io(String),
    #[error("Settings JSON error: {0}")]
    Json(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}

/// Misuse of the session lifecycle.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid lifecycle transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: LifecyclePhase,
        to: LifecyclePhase,
    },
    #[error("Session already destroyed")]
    Destroyed,
}
