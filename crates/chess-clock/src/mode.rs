//! Per-mode time accounting.
//!
//! Each timing discipline is one `ClockMode` variant. The clock measures elapsed
//! time and hands it here together with the two players' ledgers; the mode
//! decides who gets charged and who gets credited. Nothing in this module reads
//! a time source, so every rule can be exercised with plain numbers.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ClockMode {
    /// The player to move loses time, nothing else happens.
    Basic,
    /// Time lost by the player to move is gained by the opponent.
    Hourglass,
    /// A move finished within the delay costs nothing; beyond it, the excess is charged.
    Bronstein { delay: f64 },
    /// The delay is added to the incoming player's time on every turn change.
    Fischer { delay: f64 },
    /// Overtime periods are consumed before main time.
    ByoYomi,
}

/// One player's ledger.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Side {
    /// Settled main time in seconds. Under Bronstein this includes the delay credited
    /// when the player's turn began.
    pub base: f64,
    /// Bronstein delay left in the current turn, reduced by pauses.
    pub delay_budget: f64,
    /// Remaining byo-yomi periods, full lengths, front first.
    pub periods: VecDeque<f64>,
    /// Time already spent inside the front period during the current turn.
    pub period_used: f64,
}

impl Side {
    pub fn new(base: f64, periods: impl IntoIterator<Item = f64>) -> Self {
        Self {
            base,
            delay_budget: 0.0,
            periods: periods.into_iter().collect(),
            period_used: 0.0,
        }
    }

    /// Periods as a player would see them: the front one shortened by time used.
    pub fn visible_periods(&self) -> Vec<f64> {
        self.periods
            .iter()
            .enumerate()
            .map(|(i, p)| if i == 0 { p - self.period_used } else { *p })
            .collect()
    }
}

/// How a player relates to the clock at the moment of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Their time is running.
    Active,
    /// The opponent's time is running.
    Waiting,
    /// Nobody's time is running; `last` is set if this player was running before the pause.
    Paused { last: bool },
}

impl ClockMode {
    pub const fn name(&self) -> &'static str {
        match self {
            ClockMode::Basic => "basic",
            ClockMode::Hourglass => "hourglass",
            ClockMode::Bronstein { .. } => "bronstein",
            ClockMode::Fischer { .. } => "fischer",
            ClockMode::ByoYomi => "byoyomi",
        }
    }

    pub const fn delay(&self) -> Option<f64> {
        match self {
            ClockMode::Bronstein { delay } | ClockMode::Fischer { delay } => Some(*delay),
            _ => None,
        }
    }

    /// Prepare both ledgers before the clock first runs.
    pub fn on_create(&self, first: &mut Side, second: &mut Side) {
        if let ClockMode::Bronstein { delay } = *self {
            first.delay_budget = delay;
            second.delay_budget = delay;
        }
    }

    /// The first player's turn begins.
    pub fn on_start(&self, first: &mut Side) {
        if let Some(delay) = self.delay() {
            first.base += delay;
        }
    }

    /// The outgoing player finished a move after `elapsed` seconds.
    pub fn on_switch(&self, elapsed: f64, outgoing: &mut Side, incoming: &mut Side) {
        match *self {
            ClockMode::Basic => outgoing.base -= elapsed,
            ClockMode::Hourglass => {
                outgoing.base -= elapsed;
                incoming.base += elapsed;
            }
            ClockMode::Bronstein { delay } => {
                incoming.base += delay;
                outgoing.base -= delay.max(elapsed + delay - outgoing.delay_budget);
                incoming.delay_budget = delay;
            }
            ClockMode::Fischer { delay } => {
                incoming.base += delay;
                outgoing.base -= elapsed;
            }
            ClockMode::ByoYomi => {
                let overflow = spend_periods(outgoing, elapsed, true);
                outgoing.base -= overflow;
            }
        }
    }

    /// The running player was paused after `elapsed` seconds.
    pub fn on_pause(&self, elapsed: f64, active: &mut Side, other: &mut Side) {
        match *self {
            ClockMode::Basic | ClockMode::Fischer { .. } => active.base -= elapsed,
            ClockMode::Hourglass => {
                active.base -= elapsed;
                other.base += elapsed;
            }
            ClockMode::Bronstein { .. } => active.delay_budget -= elapsed,
            ClockMode::ByoYomi => {
                let overflow = spend_periods(active, elapsed, false);
                active.base -= overflow;
            }
        }
    }

    /// Remaining main time as displayed, `elapsed` seconds after the last event.
    pub fn remaining(&self, side: &Side, view: View, elapsed: f64) -> f64 {
        match (view, *self) {
            (View::Active, ClockMode::Bronstein { delay }) => {
                side.base - elapsed + side.delay_budget - 2.0 * delay
            }
            (View::Active, ClockMode::ByoYomi) => {
                let mut probe = side.clone();
                side.base - spend_periods(&mut probe, elapsed, false)
            }
            (View::Active, _) => side.base - elapsed,
            (View::Waiting, ClockMode::Hourglass) => side.base + elapsed,
            (View::Waiting, _) => side.base,
            (View::Paused { last: true }, ClockMode::Bronstein { delay }) => {
                side.base + side.delay_budget - 2.0 * delay
            }
            (View::Paused { .. }, _) => side.base,
        }
    }

    /// Byo-yomi periods as displayed, `elapsed` seconds into an active turn.
    pub fn periods(&self, side: &Side, view: View, elapsed: f64) -> Vec<f64> {
        match view {
            View::Active => {
                let mut probe = side.clone();
                spend_periods(&mut probe, elapsed, false);
                probe.visible_periods()
            }
            _ => side.visible_periods(),
        }
    }
}

/// Spend `elapsed` seconds against the player's byo-yomi bank and return the part
/// that overflowed into main time.
///
/// Periods are only removed when exceeded. When the turn is complete and a period
/// survives, it is restored to its full length for the next turn.
fn spend_periods(side: &mut Side, elapsed: f64, turn_complete: bool) -> f64 {
    if side.periods.is_empty() {
        return elapsed;
    }
    let mut used = side.period_used + elapsed;
    while let Some(&front) = side.periods.front() {
        if used <= front {
            break;
        }
        used -= front;
        side.periods.pop_front();
    }
    if side.periods.is_empty() {
        side.period_used = 0.0;
        return used;
    }
    side.period_used = if turn_complete { 0.0 } else { used };
    0.0
}
