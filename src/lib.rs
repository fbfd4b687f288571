//! Merge Shell - session shell for a ball-merging physics puzzle
//!
//! Core modules:
//! - `session`: Lifecycle state machine, HUD polling, dialogs, input routing
//! - `engine`: Boundary to the simulation engine (trait, snapshot, callbacks)
//! - `input`: Keys and flicks to engine impulses
//! - `gauge`: Pressure gauge gradient
//! - `achievement`: Merge achievement popups
//! - `settings`: Persisted preferences and validated presentation tables
//! - `platform`: Device capabilities, rotation, storage paths

pub mod achievement;
pub mod color;
pub mod engine;
pub mod error;
pub mod gauge;
pub mod input;
pub mod platform;
pub mod session;
pub mod settings;
pub mod timer;

pub use color::Rgb;
pub use engine::{EngineHandle, EngineSnapshot};
pub use error::{ConfigError, SessionError};
pub use session::{LifecyclePhase, SessionController};
pub use settings::{Settings, Theme};

/// Shell configuration constants
pub mod consts {
    use std::time::Duration;

    /// HUD poll period while resumed
    pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
}
