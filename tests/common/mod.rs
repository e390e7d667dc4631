#![allow(dead_code)]

use chess_clock::{Clock, ClockConfig, ManualSource};
use chess_notation::{GameSession, Square};

/// e4 e5 Nf3 Nc6 Bc4 Bc5 O-O
pub const ITALIAN_CASTLE: [&str; 7] = ["5254", "5755", "7163", "2836", "6134", "6835", "5171"];

/// Play `tokens` from the starting position.
pub fn played(tokens: &[&str]) -> GameSession {
    let mut session = GameSession::new();
    session.replay(tokens).expect("well-formed tokens");
    session
}

pub fn sq(name: &str) -> Square {
    Square::from_name(name).expect("valid square name")
}

/// A clock on a manual timeline, plus the handle that moves the timeline.
pub fn manual_clock(config: &ClockConfig) -> (Clock<ManualSource>, ManualSource) {
    let time = ManualSource::new();
    let clock = Clock::with_source(config, time.clone()).expect("valid clock config");
    (clock, time)
}

pub fn total(clock: &Clock<ManualSource>) -> f64 {
    clock.player1_remaining() + clock.player2_remaining()
}
