//! Clock configuration, from JSON or environment variables.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClockError;
use crate::mode::ClockMode;

/// Main time used when a player's time is missing or zero.
pub const DEFAULT_TIME_SECS: f64 = 3600.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    #[default]
    Basic,
    Hourglass,
    Bronstein,
    Fischer,
    Byoyomi,
}

impl FromStr for ModeKind {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "basic" | "none" => Ok(ModeKind::Basic),
            "hourglass" => Ok(ModeKind::Hourglass),
            "bronstein" => Ok(ModeKind::Bronstein),
            "fischer" => Ok(ModeKind::Fischer),
            "byoyomi" | "byo-yomi" => Ok(ModeKind::Byoyomi),
            other => Err(ClockError::InvalidConfig(format!("unknown mode {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Player 1 main time in seconds.
    pub p1_time: f64,
    /// Player 2 main time in seconds.
    pub p2_time: f64,
    pub mode: ModeKind,
    /// Bronstein delay or Fischer increment in seconds.
    pub delay: Option<f64>,
    pub p1_byo_yomi: Vec<f64>,
    pub p2_byo_yomi: Vec<f64>,
}

impl ClockConfig {
    pub fn new(p1_time: f64, p2_time: f64, mode: ModeKind) -> Self {
        Self {
            p1_time,
            p2_time,
            mode,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_byo_yomi(mut self, p1: Vec<f64>, p2: Vec<f64>) -> Self {
        self.p1_byo_yomi = p1;
        self.p2_byo_yomi = p2;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ClockError> {
        serde_json::from_str(json).map_err(|e| ClockError::InvalidConfig(e.to_string()))
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ClockError> {
        let mode = env::var("CLOCK_MODE")
            .ok()
            .map(|v| v.parse::<ModeKind>())
            .transpose()?
            .unwrap_or_default();

        let p1_time = env_seconds("CLOCK_P1_SECONDS")?.unwrap_or(DEFAULT_TIME_SECS);
        let p2_time = env_seconds("CLOCK_P2_SECONDS")?.unwrap_or(DEFAULT_TIME_SECS);
        let delay = env_seconds("CLOCK_DELAY")?;

        let p1_byo_yomi = match env::var("CLOCK_P1_BYO_YOMI") {
            Ok(v) => parse_periods(&v)?,
            Err(_) => Vec::new(),
        };
        let p2_byo_yomi = match env::var("CLOCK_P2_BYO_YOMI") {
            Ok(v) => parse_periods(&v)?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            p1_time,
            p2_time,
            mode,
            delay,
            p1_byo_yomi,
            p2_byo_yomi,
        })
    }

    pub fn p1_seconds(&self) -> f64 {
        non_zero_or_default(self.p1_time)
    }

    pub fn p2_seconds(&self) -> f64 {
        non_zero_or_default(self.p2_time)
    }

    pub fn validate(&self) -> Result<(), ClockError> {
        if !self.p1_time.is_finite() || !self.p2_time.is_finite() {
            return Err(ClockError::InvalidConfig("times must be finite".into()));
        }
        if self.p1_time < 0.0 || self.p2_time < 0.0 {
            return Err(ClockError::InvalidConfig("times must not be negative".into()));
        }
        if self
            .p1_byo_yomi
            .iter()
            .chain(&self.p2_byo_yomi)
            .any(|p| !p.is_finite() || *p <= 0.0)
        {
            return Err(ClockError::InvalidConfig(
                "byo-yomi periods must be positive".into(),
            ));
        }
        if matches!(self.mode, ModeKind::Bronstein | ModeKind::Fischer) {
            match self.delay {
                None => {
                    return Err(ClockError::InvalidConfig(format!(
                        "{:?} mode needs a delay",
                        self.mode
                    )))
                }
                Some(d) if !d.is_finite() || d < 0.0 => {
                    return Err(ClockError::InvalidConfig(
                        "delay must be finite and not negative".into(),
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// The accounting rule this configuration selects.
    pub fn clock_mode(&self) -> Result<ClockMode, ClockError> {
        self.validate()?;
        let delay = self.delay.unwrap_or(0.0);
        Ok(match self.mode {
            ModeKind::Basic => ClockMode::Basic,
            ModeKind::Hourglass => ClockMode::Hourglass,
            ModeKind::Bronstein => ClockMode::Bronstein { delay },
            ModeKind::Fischer => ClockMode::Fischer { delay },
            ModeKind::Byoyomi => ClockMode::ByoYomi,
        })
    }
}

fn non_zero_or_default(secs: f64) -> f64 {
    if secs == 0.0 {
        DEFAULT_TIME_SECS
    } else {
        secs
    }
}

fn env_seconds(key: &str) -> Result<Option<f64>, ClockError> {
    match env::var(key) {
        Ok(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ClockError::InvalidConfig(format!("{key} is not a number: {v:?}"))),
        Err(_) => Ok(None),
    }
}

/// Parse a comma-separated list of period lengths, e.g. `60,60,60`.
pub fn parse_periods(text: &str) -> Result<Vec<f64>, ClockError> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| ClockError::InvalidConfig(format!("bad byo-yomi period {s:?}")))
        })
        .collect()
}
