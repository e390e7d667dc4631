//! Clock error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClockError {
    #[error("Clock has not been started")]
    NotStarted,

    #[error("Clock is already started")]
    AlreadyStarted,

    #[error("Cannot switch turns while the clock is paused")]
    Paused,

    #[error("Clock is not paused")]
    NotPaused,

    #[error("Invalid clock configuration: {0}")]
    InvalidConfig(String),
}
