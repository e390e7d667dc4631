//! Transcriber configuration from environment variables and `*key value` switches.

use std::env;

use anyhow::{bail, Result};
use chess_notation::{Layout, RenderOptions};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScribeConfig {
    /// Print the board after every move.
    pub show_board: bool,

    /// Draw pieces as Unicode glyphs instead of letters.
    pub icons: bool,

    /// Box-drawing border instead of ASCII.
    pub border: bool,

    /// Print the notation table once input ends.
    pub notations: bool,

    /// Include the descriptive column in the table.
    pub descriptive: bool,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            show_board: false,
            icons: false,
            border: true,
            notations: true,
            descriptive: false,
        }
    }
}

impl ScribeConfig {
    /// Load from `SCRIBE_*` environment variables, then apply command-line switches
    /// such as `*board on *icons off`.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        for (key, field) in [
            ("SCRIBE_BOARD", "board"),
            ("SCRIBE_ICONS", "icons"),
            ("SCRIBE_BORDER", "border"),
            ("SCRIBE_NOTATIONS", "notations"),
            ("SCRIBE_DESCRIPTIVE", "descriptive"),
        ] {
            if let Ok(value) = env::var(key) {
                config.set(field, &value)?;
            }
        }

        config.apply_switches(env::args().skip(1))?;
        Ok(config)
    }

    /// Apply `*key value` pairs. Keys are case-insensitive; unknown keys are
    /// ignored with a warning.
    pub fn apply_switches<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (key, value) in parse_switches(args) {
            match key.as_str() {
                "board" | "icons" | "border" | "notations" | "descriptive" => {
                    self.set(&key, &value)?
                }
                other => warn!(switch = other, "Ignoring unknown switch"),
            }
        }
        Ok(())
    }

    fn set(&mut self, field: &str, value: &str) -> Result<()> {
        let flag = parse_flag(value)?;
        match field {
            "board" => self.show_board = flag,
            "icons" => self.icons = flag,
            "border" => self.border = flag,
            "notations" => self.notations = flag,
            "descriptive" => self.descriptive = flag,
            _ => bail!("unknown setting {field:?}"),
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            border: self.border,
            icons: self.icons,
        }
    }

    pub fn layout(&self) -> Layout {
        if self.descriptive {
            Layout::WithDescriptive
        } else {
            Layout::Standard
        }
    }
}

/// Split arguments like `*board on *icons off` into lowercase `(key, value)` pairs.
/// Anything before the first `*key` is dropped.
pub fn parse_switches<I, S>(args: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pairs: Vec<(String, Vec<String>)> = Vec::new();
    for arg in args {
        let arg = arg.as_ref().to_lowercase();
        if let Some(key) = arg.strip_prefix('*') {
            pairs.push((key.to_string(), Vec::new()));
        } else if let Some((_, words)) = pairs.last_mut() {
            words.push(arg);
        }
    }
    pairs
        .into_iter()
        .map(|(key, words)| (key, words.join(" ")))
        .collect()
}

pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "1" | "yes" | "true" => Ok(true),
        "off" | "0" | "no" | "false" => Ok(false),
        other => bail!("expected on/off, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switches() {
        let pairs = parse_switches(["ignored", "*Board", "ON", "*icons", "off"]);
        assert_eq!(
            pairs,
            vec![
                ("board".to_string(), "on".to_string()),
                ("icons".to_string(), "off".to_string()),
            ]
        );
    }

    #[test]
    fn test_switches_override_defaults() {
        let mut config = ScribeConfig::default();
        config
            .apply_switches(["*board", "yes", "*descriptive", "1", "*volume", "11"])
            .unwrap();
        assert!(config.show_board);
        assert!(config.descriptive);
        assert_eq!(config.layout(), Layout::WithDescriptive);
    }

    #[test]
    fn test_bad_flag_is_an_error() {
        let mut config = ScribeConfig::default();
        assert!(config.apply_switches(["*border", "maybe"]).is_err());
        assert!(parse_flag("False").is_ok());
    }
}
