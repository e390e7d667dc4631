//! Chess move notation engine.
//!
//! Decodes ICCF digit tokens, renders each move in SAN, figurine, long, minimal,
//! reduced and continental algebraic, Smith, descriptive, coordinate and ICCF
//! notation, and keeps the board in step so later moves disambiguate correctly.

pub mod board;
pub mod codec;
pub mod error;
pub mod notation;
pub mod piece;
pub mod session;
pub mod square;

pub use board::{candidate_moves_from, Board, RenderOptions};
pub use codec::{
    decode_digit_move, encode_internal_to_digit, iccf_to_internal, internal_game_to_iccf,
    internal_to_iccf, CastleSide, MoveDescriptor,
};
pub use error::NotationError;
pub use notation::{process_move, Column, Layout, NotationRow};
pub use piece::{Color, Piece, Promotion, Role};
pub use session::GameSession;
pub use square::Square;
