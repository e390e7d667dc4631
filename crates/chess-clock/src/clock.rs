//! Two-player game clock.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClockConfig;
use crate::error::ClockError;
use crate::mode::{ClockMode, Side, View};
use crate::source::{MonotonicSource, TimeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Turn {
    NotStarted,
    Active { player: Player },
    Paused { last: Player },
}

/// Point-in-time view of both players' clocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockSnapshot {
    pub mode: &'static str,
    pub turn: Turn,
    pub player1_remaining: f64,
    pub player2_remaining: f64,
    pub player1_periods: Vec<f64>,
    pub player2_periods: Vec<f64>,
}

pub struct Clock<S: TimeSource = MonotonicSource> {
    source: S,
    mode: ClockMode,
    turn: Turn,
    start_time: Option<f64>,
    last_event: f64,
    sides: [Side; 2],
}

impl Clock<MonotonicSource> {
    pub fn new(config: &ClockConfig) -> Result<Self, ClockError> {
        Self::with_source(config, MonotonicSource::new())
    }
}

impl<S: TimeSource> Clock<S> {
    /// Build a clock reading time from `source`. Nothing runs until [`Clock::start`].
    pub fn with_source(config: &ClockConfig, source: S) -> Result<Self, ClockError> {
        let mode = config.clock_mode()?;
        let mut first = Side::new(config.p1_seconds(), config.p1_byo_yomi.iter().copied());
        let mut second = Side::new(config.p2_seconds(), config.p2_byo_yomi.iter().copied());
        mode.on_create(&mut first, &mut second);

        debug!(
            mode = mode.name(),
            p1 = first.base,
            p2 = second.base,
            "Clock created"
        );

        Ok(Self {
            source,
            mode,
            turn: Turn::NotStarted,
            start_time: None,
            last_event: 0.0,
            sides: [first, second],
        })
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.turn, Turn::Paused { .. })
    }

    /// The player whose time is running, if any.
    pub fn active(&self) -> Option<Player> {
        match self.turn {
            Turn::Active { player } => Some(player),
            _ => None,
        }
    }

    /// Seconds on the time source when the clock was started.
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Begin the game with player one to move.
    pub fn start(&mut self) -> Result<(), ClockError> {
        if self.is_started() {
            return Err(ClockError::AlreadyStarted);
        }
        let now = self.source.now();
        self.mode.on_start(&mut self.sides[Player::One.index()]);
        self.start_time = Some(now);
        self.last_event = now;
        self.turn = Turn::Active { player: Player::One };
        debug!(at = now, "Clock started");
        Ok(())
    }

    /// End the current player's turn. Returns the player whose time now runs.
    pub fn switch(&mut self) -> Result<Player, ClockError> {
        let outgoing = match self.turn {
            Turn::NotStarted => return Err(ClockError::NotStarted),
            Turn::Paused { .. } => return Err(ClockError::Paused),
            Turn::Active { player } => player,
        };
        let now = self.source.now();
        let elapsed = now - self.last_event;

        let [first, second] = &mut self.sides;
        let (out_side, in_side) = match outgoing {
            Player::One => (first, second),
            Player::Two => (second, first),
        };
        self.mode.on_switch(elapsed, out_side, in_side);

        let incoming = outgoing.other();
        self.last_event = now;
        self.turn = Turn::Active { player: incoming };
        debug!(?outgoing, elapsed, "Turn switched");
        Ok(incoming)
    }

    /// Pause a running clock, or resume a paused one.
    pub fn pause(&mut self) -> Result<(), ClockError> {
        match self.turn {
            Turn::NotStarted => Err(ClockError::NotStarted),
            Turn::Paused { .. } => self.resume(),
            Turn::Active { player } => {
                let now = self.source.now();
                let elapsed = now - self.last_event;

                let [first, second] = &mut self.sides;
                let (active, other) = match player {
                    Player::One => (first, second),
                    Player::Two => (second, first),
                };
                self.mode.on_pause(elapsed, active, other);

                self.last_event = now;
                self.turn = Turn::Paused { last: player };
                debug!(?player, elapsed, "Clock paused");
                Ok(())
            }
        }
    }

    /// Restart the player who was running when the clock was paused.
    pub fn resume(&mut self) -> Result<(), ClockError> {
        let Turn::Paused { last } = self.turn else {
            return Err(ClockError::NotPaused);
        };
        self.last_event = self.source.now();
        self.turn = Turn::Active { player: last };
        debug!(player = ?last, "Clock resumed");
        Ok(())
    }

    /// Credit (or, with a negative amount, debit) a player's main time.
    pub fn add_time(&mut self, player: Player, seconds: f64) {
        self.sides[player.index()].base += seconds;
        debug!(?player, seconds, "Time added");
    }

    fn view_of(&self, player: Player) -> (View, f64) {
        match self.turn {
            Turn::NotStarted => (View::Paused { last: false }, 0.0),
            Turn::Paused { last } => (View::Paused { last: last == player }, 0.0),
            Turn::Active { player: running } => {
                let elapsed = self.source.now() - self.last_event;
                let view = if running == player {
                    View::Active
                } else {
                    View::Waiting
                };
                (view, elapsed)
            }
        }
    }

    /// Remaining main time for `player`, live if their clock is running.
    pub fn remaining(&self, player: Player) -> f64 {
        let (view, elapsed) = self.view_of(player);
        self.mode
            .remaining(&self.sides[player.index()], view, elapsed)
    }

    pub fn player1_remaining(&self) -> f64 {
        self.remaining(Player::One)
    }

    pub fn player2_remaining(&self) -> f64 {
        self.remaining(Player::Two)
    }

    /// Byo-yomi periods left for `player`; the front entry is what is left of the
    /// current period.
    pub fn periods(&self, player: Player) -> Vec<f64> {
        let (view, elapsed) = self.view_of(player);
        self.mode.periods(&self.sides[player.index()], view, elapsed)
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            mode: self.mode.name(),
            turn: self.turn,
            player1_remaining: self.player1_remaining(),
            player2_remaining: self.player2_remaining(),
            player1_periods: self.periods(Player::One),
            player2_periods: self.periods(Player::Two),
        }
    }
}
