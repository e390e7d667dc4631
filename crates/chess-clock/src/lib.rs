//! Two-player game clock with basic, hourglass, Bronstein, Fischer and byo-yomi
//! timing.

pub mod clock;
pub mod config;
pub mod error;
pub mod mode;
pub mod source;

pub use clock::{Clock, ClockSnapshot, Player, Turn};
pub use config::{parse_periods, ClockConfig, ModeKind, DEFAULT_TIME_SECS};
pub use error::ClockError;
pub use mode::{ClockMode, Side, View};
pub use source::{ManualSource, MonotonicSource, TimeSource};
