use serde::{Deserialize, Serialize};

const FILES: &[u8; 8] = b"abcdefgh";
const RANKS: &[u8; 8] = b"87654321";

/// Descriptive file names, queen's rook file first.
const DESCRIPTIVE_FILES: [&str; 8] = ["QR", "QN", "QB", "Q", "K", "KB", "KN", "KR"];

/// A square in board-grid coordinates: row 0 is black's back rank, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Returns `None` when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Square> {
        (row < 8 && col < 8).then_some(Square { row, col })
    }

    /// Square from one-based ICCF digits (file 1-8, rank 1-8).
    pub fn from_iccf(file: u8, rank: u8) -> Option<Square> {
        if !(1..=8).contains(&file) || !(1..=8).contains(&rank) {
            return None;
        }
        Some(Square {
            row: 8 - rank,
            col: file - 1,
        })
    }

    /// Parse an algebraic name such as `e4` (file letter may be either case).
    pub fn from_name(name: &str) -> Option<Square> {
        let mut chars = name.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() || !file.is_ascii_lowercase() || !rank.is_ascii_digit() {
            return None;
        }
        Square::from_iccf(file as u8 - b'a' + 1, rank as u8 - b'0')
    }

    /// Board-array index, `row * 8 + col`.
    pub fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    pub fn from_index(index: usize) -> Option<Square> {
        (index < 64).then(|| Square {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        })
    }

    /// The same square in shakmaty's a1 = 0 numbering.
    pub fn to_shakmaty(self) -> shakmaty::Square {
        shakmaty::Square::new(u32::from(7 - self.row) * 8 + u32::from(self.col))
    }

    pub fn from_shakmaty(square: shakmaty::Square) -> Square {
        let index = u32::from(square);
        Square {
            row: 7 - (index / 8) as u8,
            col: (index % 8) as u8,
        }
    }

    /// Step by a signed offset, `None` if that leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn file_char(self) -> char {
        FILES[self.col as usize] as char
    }

    pub fn rank_char(self) -> char {
        RANKS[self.row as usize] as char
    }

    pub fn iccf_file(self) -> u8 {
        self.col + 1
    }

    pub fn iccf_rank(self) -> u8 {
        8 - self.row
    }

    /// Descriptive file name ("QR" .. "KR").
    pub fn descriptive_file(self) -> &'static str {
        DESCRIPTIVE_FILES[self.col as usize]
    }

    /// Algebraic name with an uppercase file, e.g. `E2`.
    pub fn to_upper(self) -> String {
        format!("{}{}", self.file_char().to_ascii_uppercase(), self.rank_char())
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
