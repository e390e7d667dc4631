//! Command-line drivers for the notation engine and the game clock.

pub mod config;
pub mod script;
pub mod transcribe;

pub use config::ScribeConfig;
pub use script::{parse_script, run_script, Action, ScriptEvent};
pub use transcribe::transcribe;
