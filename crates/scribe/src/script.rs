//! Scripted clock runs.
//!
//! A script is one event per line: a timestamp in seconds followed by an action.
//!
//! ```text
//! 0     start
//! 12.5  switch
//! 20    pause
//! 25    pause
//! 30    add p2 15
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::fmt;
use std::io::Write;

use anyhow::{anyhow, bail, Context, Result};
use chess_clock::{Clock, ClockConfig, ManualSource, Player};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Start,
    Switch,
    /// Toggles between paused and running.
    Pause,
    Add { player: Player, seconds: f64 },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Start => write!(f, "start"),
            Action::Switch => write!(f, "switch"),
            Action::Pause => write!(f, "pause"),
            Action::Add {
                player: Player::One,
                seconds,
            } => write!(f, "add p1 {seconds}"),
            Action::Add {
                player: Player::Two,
                seconds,
            } => write!(f, "add p2 {seconds}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptEvent {
    pub at: f64,
    pub action: Action,
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    let mut last = 0.0;

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = parse_line(line).with_context(|| format!("script line {}", number + 1))?;
        if event.at < last {
            bail!(
                "script line {}: time {} goes back before {}",
                number + 1,
                event.at,
                last
            );
        }
        last = event.at;
        events.push(event);
    }
    Ok(events)
}

fn parse_line(line: &str) -> Result<ScriptEvent> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let at: f64 = words[0]
        .parse()
        .map_err(|_| anyhow!("bad timestamp {:?}", words[0]))?;

    let action = match words[1..] {
        ["start"] => Action::Start,
        ["switch"] => Action::Switch,
        ["pause"] => Action::Pause,
        ["add", who, amount] => {
            let player = match who {
                "p1" => Player::One,
                "p2" => Player::Two,
                other => bail!("unknown player {other:?}"),
            };
            let seconds = amount
                .parse()
                .map_err(|_| anyhow!("bad amount {amount:?}"))?;
            Action::Add { player, seconds }
        }
        _ => bail!("unrecognised action in {line:?}"),
    };
    Ok(ScriptEvent { at, action })
}

/// Run `events` against a clock built from `config`, writing both players'
/// remaining times after every event.
pub fn run_script<W: Write>(config: &ClockConfig, events: &[ScriptEvent], out: &mut W) -> Result<()> {
    let time = ManualSource::new();
    let mut clock = Clock::with_source(config, time.clone())?;

    writeln!(out, "time\tevent\tp1\tp2\tactive")?;
    for event in events {
        time.set(event.at);
        match event.action {
            Action::Start => clock.start(),
            Action::Switch => clock.switch().map(|_| ()),
            Action::Pause => clock.pause(),
            Action::Add { player, seconds } => {
                clock.add_time(player, seconds);
                Ok(())
            }
        }
        .with_context(|| format!("{} at {}s", event.action, event.at))?;

        let active = match clock.active() {
            Some(Player::One) => "p1",
            Some(Player::Two) => "p2",
            None => "-",
        };
        debug!(at = event.at, action = %event.action, "Script event applied");
        writeln!(
            out,
            "{:.1}\t{}\t{:.1}\t{:.1}\t{}",
            event.at,
            event.action,
            clock.player1_remaining(),
            clock.player2_remaining(),
            active
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_clock::ModeKind;

    #[test]
    fn test_parse_script() {
        let events = parse_script("# warmup\n0 start\n\n5 switch\n9 add p1 30\n").unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].action, Action::Start);
        assert_eq!(
            events[2],
            ScriptEvent {
                at: 9.0,
                action: Action::Add {
                    player: Player::One,
                    seconds: 30.0
                }
            }
        );
    }

    #[test]
    fn test_parse_script_errors() {
        assert!(parse_script("0 start\n5 resign\n").is_err());
        assert!(parse_script("5 start\n2 switch\n").is_err());
        assert!(parse_script("x start\n").is_err());
        assert!(parse_script("0 add p3 5\n").is_err());
    }

    #[test]
    fn test_run_hourglass_script() {
        let config = ClockConfig::new(60.0, 60.0, ModeKind::Hourglass);
        let events = parse_script("0 start\n10 switch\n14 pause\n").unwrap();
        let mut out = Vec::new();
        run_script(&config, &events, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "0.0\tstart\t60.0\t60.0\tp1");
        assert_eq!(lines[2], "10.0\tswitch\t50.0\t70.0\tp2");
        assert_eq!(lines[3], "14.0\tpause\t54.0\t66.0\t-");
    }

    #[test]
    fn test_switch_before_start_fails() {
        let config = ClockConfig::new(60.0, 60.0, ModeKind::Basic);
        let events = parse_script("1 switch\n").unwrap();
        let mut out = Vec::new();
        assert!(run_script(&config, &events, &mut out).is_err());
    }
}
