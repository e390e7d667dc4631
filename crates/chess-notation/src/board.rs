//! Board Model: an 8x8 grid of piece codes.
//!
//! Row 0 is black's back rank and row 7 is white's. The grid does not know
//! whose turn it is and never checks legality; the notation engine reads it to
//! disambiguate moves and writes each processed move back into it.

use shakmaty::{attacks, Bitboard};

use crate::piece::{Color, Piece, Role};
use crate::square::Square;

const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Board {
    /// The standard starting position.
    pub fn new_game() -> Self {
        let mut board = Self::empty();
        for (col, role) in BACK_RANK.iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(Color::Black, *role));
            board.cells[1][col] = Some(Piece::new(Color::Black, Role::Pawn));
            board.cells[6][col] = Some(Piece::new(Color::White, Role::Pawn));
            board.cells[7][col] = Some(Piece::new(Color::White, *role));
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// Build a board from eight rows of piece codes, row 0 (black's back rank) first.
    /// Blanks and dots are empty squares; rows shorter than eight are padded empty.
    pub fn from_rows(rows: [&str; 8]) -> Self {
        let mut board = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            for (col, c) in text.chars().take(8).enumerate() {
                board.cells[row][col] = Piece::from_code(c);
            }
        }
        board
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row as usize][square.col as usize] = piece;
    }

    /// Piece code letter at a square, `' '` when empty.
    pub fn code(&self, square: Square) -> char {
        self.get(square).map_or(' ', Piece::code)
    }

    /// Write a piece code letter; anything that is not a piece letter clears the square.
    pub fn set_code(&mut self, square: Square, code: char) {
        self.set(square, Piece::from_code(code));
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Every occupied square with its piece, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..64).filter_map(move |i| {
            let sq = Square::from_index(i)?;
            self.get(sq).map(|p| (sq, p))
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.map_or(' ', Piece::code)).collect())
    }

    pub fn render(&self, options: RenderOptions) -> String {
        let (top_left, top_right, bottom_left, bottom_right, horizontal, vertical) =
            if options.border {
                ('╔', '╗', '╚', '╝', '═', '║')
            } else {
                ('/', '\\', '\\', '/', '=', '|')
            };
        let rule: String = std::iter::repeat(horizontal).take(15).collect();

        let mut out = String::new();
        out.push(top_left);
        out.push_str(&rule);
        out.push(top_right);
        out.push('\n');
        for row in &self.cells {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(p) if options.icons => p.glyph().to_string(),
                    Some(p) => p.code().to_string(),
                    None => " ".to_string(),
                })
                .collect();
            out.push(vertical);
            out.push_str(&cells.join(" "));
            out.push(vertical);
            out.push('\n');
        }
        out.push(bottom_left);
        out.push_str(&rule);
        out.push(bottom_right);
        out.push('\n');
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Box-drawing frame instead of ASCII.
    pub border: bool,
    /// Unicode glyphs instead of piece letters.
    pub icons: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            border: true,
            icons: false,
        }
    }
}

/// Every occupied square as a bitboard.
pub fn occupancy(board: &Board) -> Bitboard {
    board
        .pieces()
        .fold(Bitboard::EMPTY, |bb, (sq, _)| bb | Bitboard::from(sq.to_shakmaty()))
}

/// Squares a piece standing on `from` could move to by raw geometry alone.
///
/// Pawns only contribute their two diagonal capture squares. Sliding pieces stop
/// at the first occupied square, which is included regardless of its color.
pub fn candidate_moves_from(piece: Piece, board: &Board, from: Square) -> Vec<Square> {
    let sq = from.to_shakmaty();
    let occupied = occupancy(board);
    let targets = match piece.role {
        Role::Pawn => attacks::pawn_attacks(piece.color.to_shakmaty(), sq),
        Role::Knight => attacks::knight_attacks(sq),
        Role::Bishop => attacks::bishop_attacks(sq, occupied),
        Role::Rook => attacks::rook_attacks(sq, occupied),
        Role::Queen => attacks::queen_attacks(sq, occupied),
        Role::King => attacks::king_attacks(sq),
    };
    targets.into_iter().map(Square::from_shakmaty).collect()
}

/// Other squares holding the same piece that could also reach `dest`.
pub fn rival_sources(board: &Board, piece: Piece, source: Square, dest: Square) -> Vec<Square> {
    board
        .pieces()
        .filter(|&(sq, p)| p == piece && sq != source)
        .filter(|&(sq, p)| candidate_moves_from(p, board, sq).contains(&dest))
        .map(|(sq, _)| sq)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    #[test]
    fn test_new_game_layout() {
        let board = Board::new_game();
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.code(sq("e1")), 'K');
        assert_eq!(board.code(sq("d8")), 'q');
        assert_eq!(board.code(sq("e4")), ' ');
        let rows: Vec<String> = board.rows().collect();
        assert_eq!(rows[0], "rnbqkbnr");
        assert_eq!(rows[7], "RNBQKBNR");
    }

    #[test]
    fn test_knight_geometry_from_corner() {
        let board = Board::new_game();
        let knight = Piece::from_code('N').unwrap();
        let mut moves = candidate_moves_from(knight, &board, sq("a1"));
        moves.sort_by_key(|s| s.index());
        assert_eq!(moves, vec![sq("b3"), sq("c2")]);
    }

    #[test]
    fn test_rook_rays_stop_at_first_occupant() {
        let board = Board::from_rows([
            "        ", "        ", "        ", "   p    ", "        ", "        ", "        ",
            "R  K    ",
        ]);
        let rook = Piece::from_code('R').unwrap();
        let moves = candidate_moves_from(rook, &board, sq("a1"));
        assert!(moves.contains(&sq("b1")));
        assert!(moves.contains(&sq("d1")));
        assert!(!moves.contains(&sq("e1")));
        assert!(moves.contains(&sq("a8")));
        assert_eq!(moves.len(), 10);
    }

    #[test]
    fn test_queen_rays_include_blockers_of_either_color() {
        let board = Board::from_rows([
            "        ", "        ", "        ", "        ", "        ", "        ", "  pP    ",
            "   Q    ",
        ]);
        let queen = Piece::from_code('Q').unwrap();
        let moves = candidate_moves_from(queen, &board, sq("d1"));
        assert!(moves.contains(&sq("d2")));
        assert!(!moves.contains(&sq("d3")));
        assert!(moves.contains(&sq("c2")));
        assert!(!moves.contains(&sq("b3")));
        assert!(moves.contains(&sq("h5")));
        assert_eq!(occupancy(&board).count(), 3);
    }

    #[test]
    fn test_pawn_geometry_is_diagonal_only() {
        let board = Board::new_game();
        let black_pawn = Piece::from_code('p').unwrap();
        let mut moves = candidate_moves_from(black_pawn, &board, sq("e7"));
        moves.sort_by_key(|s| s.index());
        assert_eq!(moves, vec![sq("d6"), sq("f6")]);
    }

    #[test]
    fn test_rival_sources_finds_other_knight() {
        let board = Board::from_rows([
            "        ", "        ", "        ", "        ", "        ", "        ", "        ",
            " N   N  ",
        ]);
        let knight = Piece::from_code('N').unwrap();
        // Both knights reach d2.
        assert_eq!(rival_sources(&board, knight, sq("b1"), sq("d2")), vec![sq("f1")]);
        // Only the b1 knight reaches a3.
        assert!(rival_sources(&board, knight, sq("b1"), sq("a3")).is_empty());
    }

    #[test]
    fn test_render_ascii_frame() {
        let board = Board::new_game();
        let text = board.render(RenderOptions {
            border: false,
            icons: false,
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "/===============\\");
        assert_eq!(lines[1], "|r n b q k b n r|");
        assert_eq!(lines[4], "|               |");
        assert_eq!(lines[9], "\\===============/");
    }

    #[test]
    fn test_render_icons() {
        let board = Board::new_game();
        let text = board.render(RenderOptions {
            border: true,
            icons: true,
        });
        assert!(text.starts_with('╔'));
        assert!(text.contains("║♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖║"));
    }
}
