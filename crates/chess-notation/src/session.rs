//! Game session: the board plus its append-only Result Log.

use crate::board::Board;
use crate::codec::{decode_digit_move, MoveDescriptor};
use crate::error::NotationError;
use crate::notation::{process_move, Layout, NotationRow};

#[derive(Debug, Clone, Default)]
pub struct GameSession {
    board: Board,
    log: Vec<NotationRow>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over from the initial position with an empty log.
    pub fn new_game(&mut self) {
        self.board = Board::new_game();
        self.log.clear();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for callers that set up positions themselves.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn log(&self) -> &[NotationRow] {
        &self.log
    }

    /// Decode an ICCF token, process it and append the row to the log.
    /// A malformed token fails before the board or the log is touched.
    pub fn do_move(&mut self, token: &str) -> Result<&NotationRow, NotationError> {
        let mv = decode_digit_move(token)?;
        Ok(self.apply(&mv))
    }

    pub fn apply(&mut self, mv: &MoveDescriptor) -> &NotationRow {
        let row = process_move(&mut self.board, mv);
        self.log.push(row);
        &self.log[self.log.len() - 1]
    }

    /// Reset and play a whole ICCF game. Stops at the first malformed token; the moves
    /// before it stay applied.
    pub fn replay<I, S>(&mut self, tokens: I) -> Result<usize, NotationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.new_game();
        for token in tokens {
            self.do_move(token.as_ref())?;
        }
        Ok(self.log.len())
    }

    /// The canonical ICCF form of every logged move.
    pub fn iccf_moves(&self) -> Vec<&str> {
        self.log.iter().map(|row| row.iccf.as_str()).collect()
    }

    /// Header line followed by one tab-separated line per move.
    pub fn export_tsv(&self, layout: Layout) -> String {
        let mut out = layout.header();
        out.push('\n');
        for row in &self.log {
            out.push_str(&row.to_tsv(layout));
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.log)
    }
}
