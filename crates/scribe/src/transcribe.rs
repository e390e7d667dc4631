//! Read ICCF move tokens line by line and write the notation table.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chess_notation::GameSession;
use tracing::{info, warn};

use crate::config::ScribeConfig;

/// Feed every line of `input` to a fresh game until EOF or a blank line.
///
/// Malformed tokens are reported and skipped. Returns the number of moves
/// recorded.
pub fn transcribe<R, W>(input: R, out: &mut W, config: &ScribeConfig) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut session = GameSession::new();
    let options = config.render_options();

    if config.show_board {
        write!(out, "{}", session.board().render(options))?;
    }

    for (number, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("reading input line {}", number + 1))?;
        let token = line.trim_end_matches(['\r', '\n']);
        if token.trim().is_empty() {
            break;
        }

        match session.do_move(token) {
            Ok(_) => {
                if config.show_board {
                    write!(out, "{}", session.board().render(options))?;
                }
            }
            Err(e) => warn!(line = number + 1, error = %e, "Skipping move"),
        }
    }

    if config.notations {
        write!(out, "{}", session.export_tsv(config.layout()))?;
    }
    out.flush()?;

    let moves = session.log().len();
    info!(moves, "Transcription finished");
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, config: &ScribeConfig) -> (usize, String) {
        let mut out = Vec::new();
        let moves = transcribe(input.as_bytes(), &mut out, config).unwrap();
        (moves, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_table_only() {
        let (moves, text) = run("5254\n5755\n", &ScribeConfig::default());
        assert_eq!(moves, 2);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SAN\tFigurine"));
        assert!(lines[1].starts_with("e4\t"));
        assert!(lines[2].starts_with("e5\t"));
    }

    #[test]
    fn test_blank_line_ends_input() {
        let (moves, _) = run("5254\n\n5755\n", &ScribeConfig::default());
        assert_eq!(moves, 1);
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let (moves, text) = run("5254\nhello\n5755\n", &ScribeConfig::default());
        assert_eq!(moves, 2);
        assert!(!text.contains("hello"));
    }

    #[test]
    fn test_board_printed_per_move() {
        let config = ScribeConfig {
            show_board: true,
            notations: false,
            border: false,
            ..ScribeConfig::default()
        };
        let (_, text) = run("5254\n", &config);
        assert_eq!(text.matches("/===============\\").count(), 2);
        assert!(!text.contains("SAN"));
    }
}
