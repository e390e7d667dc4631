//! Replay a scripted game against the clock.
//!
//! Usage:
//!   clock-replay [config.json] [script.txt]
//!
//! Without a config file the clock is configured from CLOCK_* environment
//! variables (or a .env file). Without a script file the script is read from
//! stdin.

use std::io::{self, Read};

use anyhow::Context;
use chess_clock::ClockConfig;
use scribe::{parse_script, run_script};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match args.first() {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading clock config {path}"))?;
            ClockConfig::from_json(&json)?
        }
        None => ClockConfig::from_env()?,
    };
    info!(mode = ?config.mode, p1 = config.p1_seconds(), p2 = config.p2_seconds(), "Clock config loaded");

    let script = match args.get(1) {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("reading script {path}"))?
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading script from stdin")?;
            text
        }
    };

    let events = parse_script(&script)?;
    info!(events = events.len(), "Script parsed");

    let stdout = io::stdout();
    run_script(&config, &events, &mut stdout.lock())?;
    Ok(())
}
