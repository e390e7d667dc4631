//! Notation transcriber.
//!
//! Reads one ICCF move per line from stdin until EOF or a blank line, then prints
//! every move in each notation as a tab-separated table.
//!
//! Usage:
//!   scribe [*board on] [*icons on] [*border off] [*notations off] [*descriptive on]
//!
//! The same switches can be set with SCRIBE_BOARD, SCRIBE_ICONS, SCRIBE_BORDER,
//! SCRIBE_NOTATIONS and SCRIBE_DESCRIPTIVE (or a .env file).

use std::io;

use scribe::{transcribe, ScribeConfig};
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

    let config = ScribeConfig::load()?;
    info!(?config, "Scribe config loaded");

    let stdin = io::stdin();
    let stdout = io::stdout();
    transcribe(stdin.lock(), &mut stdout.lock(), &config)?;
    Ok(())
}
