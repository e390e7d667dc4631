//! Notation Engine.
//!
//! Turns a decoded move plus the current board into one string per notation
//! scheme, then applies the move to the board. Legality is never checked; a move
//! from an empty square yields a degenerate row and leaves the board untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{rival_sources, Board};
use crate::codec::{CastleSide, MoveDescriptor};
use crate::piece::{Color, Piece, Promotion, Role};
use crate::square::Square;

/// One column of the exported notation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    San,
    Figurine,
    LongAlgebraic,
    MinimalAlgebraic,
    ReducedAlgebraic,
    Continental,
    Smith,
    Descriptive,
    Coordinate,
    Iccf,
    Comments,
}

impl Column {
    pub const fn title(self) -> &'static str {
        match self {
            Column::San => "SAN",
            Column::Figurine => "Figurine",
            Column::LongAlgebraic => "Long Algebraic",
            Column::MinimalAlgebraic => "Minimal Algebraic",
            Column::ReducedAlgebraic => "Reduced Algebraic",
            Column::Continental => "Continental",
            Column::Smith => "Smith",
            Column::Descriptive => "Descriptive",
            Column::Coordinate => "Coordinate",
            Column::Iccf => "ICCF",
            Column::Comments => "Comments",
        }
    }
}

pub const STANDARD_COLUMNS: [Column; 10] = [
    Column::San,
    Column::Figurine,
    Column::LongAlgebraic,
    Column::MinimalAlgebraic,
    Column::ReducedAlgebraic,
    Column::Continental,
    Column::Smith,
    Column::Coordinate,
    Column::Iccf,
    Column::Comments,
];

pub const DESCRIPTIVE_COLUMNS: [Column; 11] = [
    Column::San,
    Column::Figurine,
    Column::LongAlgebraic,
    Column::MinimalAlgebraic,
    Column::ReducedAlgebraic,
    Column::Continental,
    Column::Smith,
    Column::Descriptive,
    Column::Coordinate,
    Column::Iccf,
    Column::Comments,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// The fixed ten-column table.
    #[default]
    Standard,
    /// Ten columns plus Descriptive between Smith and Coordinate.
    WithDescriptive,
}

impl Layout {
    pub fn columns(self) -> &'static [Column] {
        match self {
            Layout::Standard => &STANDARD_COLUMNS,
            Layout::WithDescriptive => &DESCRIPTIVE_COLUMNS,
        }
    }

    pub fn header(self) -> String {
        self.columns()
            .iter()
            .map(|c| c.title())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Every notation for one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotationRow {
    pub san: String,
    pub fan: String,
    pub lan: String,
    pub man: String,
    pub ran: String,
    pub cran: String,
    pub smith: String,
    pub descriptive: String,
    pub coordinate: String,
    pub iccf: String,
    pub comments: String,
}

impl NotationRow {
    pub fn get(&self, column: Column) -> &str {
        match column {
            Column::San => &self.san,
            Column::Figurine => &self.fan,
            Column::LongAlgebraic => &self.lan,
            Column::MinimalAlgebraic => &self.man,
            Column::ReducedAlgebraic => &self.ran,
            Column::Continental => &self.cran,
            Column::Smith => &self.smith,
            Column::Descriptive => &self.descriptive,
            Column::Coordinate => &self.coordinate,
            Column::Iccf => &self.iccf,
            Column::Comments => &self.comments,
        }
    }

    pub fn columns(&self, layout: Layout) -> Vec<&str> {
        layout.columns().iter().map(|c| self.get(*c)).collect()
    }

    /// One TSV line. Tabs and line breaks inside a field become spaces.
    pub fn to_tsv(&self, layout: Layout) -> String {
        self.columns(layout)
            .iter()
            .map(|field| field.replace(['\t', '\r', '\n'], " "))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Produce the notation row for `mv` and apply it to `board`.
pub fn process_move(board: &mut Board, mv: &MoveDescriptor) -> NotationRow {
    if let Some(side) = mv.castle {
        let king = Piece::new(side.color(), Role::King);
        if board.get(side.king_from()) == Some(king) {
            let row = castle_row(side, mv);
            apply_castle(board, side);
            debug!(castle = side.tag(), san = %row.san, "Processed castle");
            return row;
        }
    }

    let Some(piece) = board.get(mv.from) else {
        warn!(from = %mv.from, to = %mv.to, "Move from an empty square, board left unchanged");
        return MoveFacts::vacant(board, mv).render(mv);
    };

    let facts = MoveFacts::gather(board, piece, mv);
    let row = facts.render(mv);
    facts.apply(board);
    debug!(iccf = %row.iccf, san = %row.san, "Processed move");
    row
}

/// Everything the string builders need, read from the board before it changes.
struct MoveFacts {
    piece: Option<Piece>,
    from: Square,
    to: Square,
    captured: Option<Role>,
    en_passant: bool,
    promotion: Option<Promotion>,
    file_qualifier: bool,
    rank_qualifier: bool,
}

impl MoveFacts {
    fn gather(board: &Board, piece: Piece, mv: &MoveDescriptor) -> Self {
        let on_dest = board.get(mv.to);
        let en_passant = piece.role == Role::Pawn && mv.from.col != mv.to.col && on_dest.is_none();
        let captured = if en_passant {
            Some(Role::Pawn)
        } else {
            on_dest.map(|p| p.role)
        };

        let promotes = piece.role == Role::Pawn && mv.to.row == piece.color.promotion_row();
        let promotion = mv.promotion.filter(|_| promotes);
        if mv.promotion.is_some() && !promotes {
            warn!(from = %mv.from, to = %mv.to, "Ignoring promotion digit on a non-promoting move");
        }

        let mut file_qualifier = false;
        let mut rank_qualifier = false;
        let capture = captured.is_some();
        // Pawn pushes never need a qualifier; only their captures are scanned.
        if piece.role != Role::Pawn || capture {
            for rival in rival_sources(board, piece, mv.from, mv.to) {
                if rival.col != mv.from.col {
                    file_qualifier = true;
                } else {
                    rank_qualifier = true;
                }
            }
        }
        if piece.role == Role::Pawn && capture {
            file_qualifier = true;
        }

        Self {
            piece: Some(piece),
            from: mv.from,
            to: mv.to,
            captured,
            en_passant,
            promotion,
            file_qualifier,
            rank_qualifier,
        }
    }

    fn vacant(board: &Board, mv: &MoveDescriptor) -> Self {
        Self {
            piece: None,
            from: mv.from,
            to: mv.to,
            captured: board.get(mv.to).map(|p| p.role),
            en_passant: false,
            promotion: None,
            file_qualifier: false,
            rank_qualifier: false,
        }
    }

    fn color(&self) -> Color {
        self.piece.map_or(Color::White, |p| p.color)
    }

    /// Piece letter, empty for pawns.
    fn letter(&self) -> String {
        match self.piece {
            Some(p) if p.role != Role::Pawn => p.role.letter().to_string(),
            _ => String::new(),
        }
    }

    fn glyph(&self) -> String {
        match self.piece {
            Some(p) if p.role != Role::Pawn => p.glyph().to_string(),
            _ => String::new(),
        }
    }

    fn qualifiers(&self) -> String {
        let mut q = String::new();
        if self.file_qualifier {
            q.push(self.from.file_char());
        }
        if self.rank_qualifier {
            q.push(self.from.rank_char());
        }
        q
    }

    fn promo_letter(&self) -> String {
        self.promotion.map(|p| p.letter().to_string()).unwrap_or_default()
    }

    fn promo_glyph(&self) -> String {
        self.promotion
            .map(|p| Piece::new(self.color(), p.role()).glyph().to_string())
            .unwrap_or_default()
    }

    fn promo_parens(&self) -> String {
        self.promotion
            .map(|p| format!("({})", p.letter()))
            .unwrap_or_default()
    }

    fn captured_letter(&self) -> String {
        self.captured.map(|r| r.letter().to_string()).unwrap_or_default()
    }

    /// Descriptive square name, ranks counted from the mover's side.
    fn descriptive(&self, square: Square) -> String {
        let rank = match self.color() {
            Color::White => 8 - square.row,
            Color::Black => square.row + 1,
        };
        format!("{}{}", square.descriptive_file(), rank)
    }

    fn render(&self, mv: &MoveDescriptor) -> NotationRow {
        let letter = self.letter();
        let q = self.qualifiers();
        let dest = self.to.to_string();
        let src = self.from.to_string();
        let promo = self.promo_letter();
        let suffix = mv.annotation.as_str();
        let capture = self.captured.is_some();
        let x = if capture { "x" } else { "" };

        let san = format!("{letter}{q}{x}{dest}{promo}{suffix}");
        let fan = format!(
            "{}{q}{x}{dest}{}{suffix}",
            self.glyph(),
            self.promo_glyph()
        );
        let lan = format!(
            "{letter}{src}{}{dest}{promo}{suffix}",
            if capture { "x" } else { "-" }
        );
        let man = format!("{letter}{q}{dest}{promo}");
        let ran = format!(
            "{letter}{src}{}{dest}{promo}{suffix}",
            if capture {
                format!("x{}", self.captured_letter())
            } else {
                "-".to_string()
            }
        );
        let cran = format!(
            "{letter}{q}{}{dest}{promo}{suffix}",
            if capture {
                format!(":{}", self.captured_letter())
            } else {
                String::new()
            }
        );
        let smith_capture = if self.en_passant {
            "E".to_string()
        } else {
            self.captured_letter().to_lowercase()
        };
        let smith = format!("{src}{dest}{smith_capture}{promo}");

        let mover = self.piece.map(|p| p.role.letter().to_string()).unwrap_or_default();
        let descriptive = format!(
            "{}{mover}{}{}{}{}{suffix}",
            self.descriptive(self.from),
            if capture { "x" } else { "-" },
            self.descriptive(self.to),
            self.captured_letter(),
            self.promo_parens()
        );

        let coordinate = format!(
            "{}-{}{}",
            self.from.to_upper(),
            self.to.to_upper(),
            self.promo_parens()
        );
        let iccf = format!(
            "{}{}{}{}{}",
            self.from.iccf_file(),
            self.from.iccf_rank(),
            self.to.iccf_file(),
            self.to.iccf_rank(),
            self.promotion.map(|p| p.digit().to_string()).unwrap_or_default()
        );

        NotationRow {
            san,
            fan,
            lan,
            man,
            ran,
            cran,
            smith,
            descriptive,
            coordinate,
            iccf,
            comments: mv.comment.trim().to_string(),
        }
    }

    fn apply(&self, board: &mut Board) {
        let Some(piece) = self.piece else {
            return;
        };
        if self.en_passant {
            // The captured pawn sits one rank behind the destination.
            if let Some(behind) = self.to.offset(-piece.color.forward(), 0) {
                board.set(behind, None);
            }
        }
        let placed = match self.promotion {
            Some(promo) => Piece::new(piece.color, promo.role()),
            None => piece,
        };
        board.set(self.from, None);
        board.set(self.to, Some(placed));
    }
}

fn castle_row(side: CastleSide, mv: &MoveDescriptor) -> NotationRow {
    let (algebraic, descriptive, smith_flag) = if side.is_kingside() {
        ("0-0", "O-O", 'c')
    } else {
        ("0-0-0", "O-O-O", 'C')
    };
    let suffix = mv.annotation.as_str();
    let with_suffix = format!("{algebraic}{suffix}");

    NotationRow {
        san: with_suffix.clone(),
        fan: with_suffix.clone(),
        lan: with_suffix.clone(),
        man: algebraic.to_string(),
        ran: with_suffix.clone(),
        cran: with_suffix,
        smith: format!("{}{}{}", side.king_from(), side.king_to(), smith_flag),
        descriptive: format!("{descriptive}{suffix}"),
        coordinate: format!("{}-{}", side.king_from().to_upper(), side.king_to().to_upper()),
        iccf: side.iccf().to_string(),
        comments: mv.comment.trim().to_string(),
    }
}

fn apply_castle(board: &mut Board, side: CastleSide) {
    let king = board.get(side.king_from());
    let rook = board.get(side.rook_from());
    board.set(side.king_from(), None);
    board.set(side.rook_from(), None);
    board.set(side.king_to(), king);
    if rook.is_some() {
        board.set(side.rook_to(), rook);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_digit_move;

    fn play(board: &mut Board, token: &str) -> NotationRow {
        let mv = decode_digit_move(token).unwrap();
        process_move(board, &mv)
    }

    fn sq(name: &str) -> Square {
        Square::from_name(name).unwrap()
    }

    #[test]
    fn test_pawn_push_from_start() {
        let mut board = Board::new_game();
        let row = play(&mut board, "5254");
        assert_eq!(row.san, "e4");
        assert_eq!(row.fan, "e4");
        assert_eq!(row.lan, "e2-e4");
        assert_eq!(row.man, "e4");
        assert_eq!(row.ran, "e2-e4");
        assert_eq!(row.cran, "e4");
        assert_eq!(row.smith, "e2e4");
        assert_eq!(row.descriptive, "K2P-K4");
        assert_eq!(row.coordinate, "E2-E4");
        assert_eq!(row.iccf, "5254");
        assert_eq!(row.comments, "");
        assert_eq!(board.code(sq("e4")), 'P');
        assert!(board.is_empty(sq("e2")));
    }

    #[test]
    fn test_knight_development_and_figurine() {
        let mut board = Board::new_game();
        let row = play(&mut board, "7163");
        assert_eq!(row.san, "Nf3");
        assert_eq!(row.fan, "♘f3");
        assert_eq!(row.lan, "Ng1-f3");
        assert_eq!(row.descriptive, "KN1N-KB3");

        let row = play(&mut board, "2836");
        assert_eq!(row.san, "Nc6");
        assert_eq!(row.fan, "♞c6");
        // Black ranks count from black's side.
        assert_eq!(row.descriptive, "QN1N-QB3");
    }

    #[test]
    fn test_capture_notations() {
        let mut board = Board::new_game();
        play(&mut board, "5254"); // e4
        play(&mut board, "4745"); // d5
        let row = play(&mut board, "5445"); // exd5
        assert_eq!(row.san, "exd5");
        assert_eq!(row.lan, "e4xd5");
        assert_eq!(row.man, "ed5");
        assert_eq!(row.ran, "e4xPd5");
        assert_eq!(row.cran, "e:Pd5");
        assert_eq!(row.smith, "e4d5p");
        assert_eq!(row.descriptive, "K4PxQ5P");
        assert_eq!(board.piece_count(), 31);
    }

    #[test]
    fn test_file_qualifier_for_knights() {
        let mut board = Board::from_rows([
            "    k   ", "        ", "        ", "        ", "        ", "        ", "        ",
            " N   N K",
        ]);
        let row = play(&mut board, "2142"); // Nb1-d2 with Nf1 also covering d2
        assert_eq!(row.san, "Nbd2");
        assert_eq!(row.man, "Nbd2");
        assert_eq!(row.cran, "Nbd2");
        assert_eq!(row.lan, "Nb1-d2");
    }

    #[test]
    fn test_rank_qualifier_for_rooks_on_same_file() {
        let mut board = Board::from_rows([
            "R   k   ", "        ", "        ", "        ", "        ", "        ", "        ",
            "R      K",
        ]);
        let row = play(&mut board, "1114"); // Ra1-a4, Ra8 also reaches a4
        assert_eq!(row.san, "R1a4");
    }

    #[test]
    fn test_blocked_rival_is_not_a_candidate() {
        let mut board = Board::from_rows([
            "R   k   ", "        ", "        ", "P       ", "        ", "        ", "        ",
            "R      K",
        ]);
        let row = play(&mut board, "1114");
        assert_eq!(row.san, "Ra4");
    }

    #[test]
    fn test_en_passant_clears_square_behind() {
        let mut board = Board::new_game();
        play(&mut board, "5254"); // e4
        play(&mut board, "1716"); // a6
        play(&mut board, "5455"); // e5
        play(&mut board, "4755"); // d5
        let before = board.piece_count();
        let row = play(&mut board, "5546"); // exd6 e.p.
        assert_eq!(row.san, "exd6");
        assert_eq!(row.smith, "e5d6E");
        assert_eq!(row.ran, "e5xPd6");
        assert_eq!(row.descriptive, "K5PxQ6P");
        assert_eq!(board.piece_count(), before - 1);
        assert!(board.is_empty(sq("d5")));
        assert_eq!(board.code(sq("d6")), 'P');
    }

    #[test]
    fn test_promotion_applies_and_renders() {
        let mut board = Board::from_rows([
            "   r k  ", "  P     ", "        ", "        ", "        ", "        ", "        ",
            "    K   ",
        ]);
        let row = play(&mut board, "37484+"); // cxd8=N+
        assert_eq!(row.san, "cxd8N+");
        assert_eq!(row.fan, "cxd8♘+");
        assert_eq!(row.ran, "c7xRd8N+");
        assert_eq!(row.smith, "c7d8rN");
        assert_eq!(row.coordinate, "C7-D8(N)");
        assert_eq!(row.iccf, "37484");
        assert_eq!(row.descriptive, "QB7PxQ8R(N)+");
        assert_eq!(board.code(sq("d8")), 'N');
        assert_eq!(board.piece_count(), 3);
    }

    #[test]
    fn test_black_promotion_glyph_matches_mover() {
        let mut board = Board::from_rows([
            "    k   ", "        ", "        ", "        ", "        ", "        ", "p       ",
            "       K",
        ]);
        let row = play(&mut board, "12111");
        assert_eq!(row.san, "a1Q");
        assert_eq!(row.fan, "a1♛");
        assert_eq!(board.code(sq("a1")), 'q');
    }

    #[test]
    fn test_promotion_digit_ignored_when_not_promoting() {
        let mut board = Board::new_game();
        let row = play(&mut board, "52541");
        assert_eq!(row.san, "e4");
        assert_eq!(row.iccf, "5254");
        assert_eq!(board.code(sq("e4")), 'P');
    }

    #[test]
    fn test_castle_rows() {
        let mut board = Board::from_rows([
            "r   k  r", "        ", "        ", "        ", "        ", "        ", "        ",
            "R   K  R",
        ]);
        let row = play(&mut board, "5171");
        assert_eq!(row.san, "0-0");
        assert_eq!(row.smith, "e1g1c");
        assert_eq!(row.coordinate, "E1-G1");
        assert_eq!(row.iccf, "5171");
        assert_eq!(row.descriptive, "O-O");
        assert_eq!(board.code(sq("g1")), 'K');
        assert_eq!(board.code(sq("f1")), 'R');
        assert!(board.is_empty(sq("e1")));
        assert!(board.is_empty(sq("h1")));

        let row = play(&mut board, "5838+ check");
        assert_eq!(row.san, "0-0-0+");
        assert_eq!(row.man, "0-0-0");
        assert_eq!(row.smith, "e8c8C");
        assert_eq!(row.coordinate, "E8-C8");
        assert_eq!(row.comments, "check");
        assert_eq!(board.code(sq("c8")), 'k');
        assert_eq!(board.code(sq("d8")), 'r');
        assert!(board.is_empty(sq("a8")));
    }

    #[test]
    fn test_castle_token_with_zero_promotion_digit() {
        let mut board = Board::from_rows([
            "    k   ", "        ", "        ", "        ", "        ", "        ", "        ",
            "    K  R",
        ]);
        let row = play(&mut board, "51710");
        assert_eq!(row.san, "0-0");
        assert_eq!(row.iccf, "5171");
        assert_eq!(board.code(sq("g1")), 'K');
        assert_eq!(board.code(sq("f1")), 'R');
        assert!(board.is_empty(sq("h1")));
    }

    #[test]
    fn test_castle_token_without_home_king_is_plain_move() {
        let mut board = Board::from_rows([
            "    k   ", "        ", "        ", "        ", "        ", "        ", "        ",
            "    R  K",
        ]);
        let row = play(&mut board, "5171");
        assert_eq!(row.san, "Rg1");
        assert_eq!(board.code(sq("g1")), 'R');
    }

    #[test]
    fn test_move_from_empty_square_leaves_board() {
        let mut board = Board::new_game();
        let before = board.clone();
        let row = play(&mut board, "5455");
        assert_eq!(row.san, "e5");
        assert_eq!(row.iccf, "5455");
        assert_eq!(board, before);
    }

    #[test]
    fn test_layout_headers() {
        assert_eq!(
            Layout::Standard.header(),
            "SAN\tFigurine\tLong Algebraic\tMinimal Algebraic\tReduced Algebraic\tContinental\tSmith\tCoordinate\tICCF\tComments"
        );
        assert_eq!(Layout::WithDescriptive.columns()[7], Column::Descriptive);
    }
}
