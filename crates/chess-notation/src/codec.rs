//! Move Codec: conversions between move token encodings.
//!
//! - ICCF digit tokens: `{src_file}{src_rank}{dst_file}{dst_rank}`, one-based, optionally
//!   followed by a promotion digit (0-4) and trailing annotation/comment text.
//! - Internal text: `{src_col}{src_row}{dst_col}{dst_row}`, zero-based grid coordinates,
//!   with castle tags `wl`, `wr`, `bl`, `br`.
//! - Board-array indices, see [`Square::index`].

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::NotationError;
use crate::piece::{Color, Promotion};
use crate::square::Square;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([0-9])([0-9])([0-9])([0-9])([0-9])?([+#=\-]*)(.*)$")
        .expect("move token pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    WhiteQueenside,
    WhiteKingside,
    BlackQueenside,
    BlackKingside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 4] = [
        CastleSide::WhiteQueenside,
        CastleSide::WhiteKingside,
        CastleSide::BlackQueenside,
        CastleSide::BlackKingside,
    ];

    /// Fixed ICCF token for this castle.
    pub const fn iccf(self) -> &'static str {
        match self {
            CastleSide::WhiteQueenside => "5131",
            CastleSide::WhiteKingside => "5171",
            CastleSide::BlackQueenside => "5838",
            CastleSide::BlackKingside => "5878",
        }
    }

    /// Internal castle tag.
    pub const fn tag(self) -> &'static str {
        match self {
            CastleSide::WhiteQueenside => "wl",
            CastleSide::WhiteKingside => "wr",
            CastleSide::BlackQueenside => "bl",
            CastleSide::BlackKingside => "br",
        }
    }

    pub fn from_iccf(code: &str) -> Option<CastleSide> {
        Self::ALL.into_iter().find(|side| side.iccf() == code)
    }

    pub fn from_tag(tag: &str) -> Option<CastleSide> {
        Self::ALL.into_iter().find(|side| side.tag() == tag)
    }

    pub const fn color(self) -> Color {
        match self {
            CastleSide::WhiteQueenside | CastleSide::WhiteKingside => Color::White,
            CastleSide::BlackQueenside | CastleSide::BlackKingside => Color::Black,
        }
    }

    pub const fn is_kingside(self) -> bool {
        matches!(self, CastleSide::WhiteKingside | CastleSide::BlackKingside)
    }

    const fn home_row(self) -> u8 {
        match self.color() {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn king_from(self) -> Square {
        Square {
            row: self.home_row(),
            col: 4,
        }
    }

    pub const fn king_to(self) -> Square {
        Square {
            row: self.home_row(),
            col: if self.is_kingside() { 6 } else { 2 },
        }
    }

    pub const fn rook_from(self) -> Square {
        Square {
            row: self.home_row(),
            col: if self.is_kingside() { 7 } else { 0 },
        }
    }

    pub const fn rook_to(self) -> Square {
        Square {
            row: self.home_row(),
            col: if self.is_kingside() { 5 } else { 3 },
        }
    }
}

/// A decoded move token. Built per move and handed to the notation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
    /// The promotion digit exactly as written, `0` included.
    pub promotion_digit: Option<u8>,
    /// Leading run of `+ # = -` after the coordinates, passed through to the notations.
    pub annotation: String,
    /// Free text after the annotation, untouched.
    pub comment: String,
    /// Set when the coordinates are one of the four fixed castle tokens.
    pub castle: Option<CastleSide>,
}

impl MoveDescriptor {
    /// Annotation plus comment exactly as they followed the coordinates.
    pub fn suffix(&self) -> String {
        format!("{}{}", self.annotation, self.comment)
    }

    /// Re-encode to the digit token it was decoded from.
    pub fn to_token(&self) -> String {
        let mut token = encode_internal_to_digit(self.from, self.to, None, "");
        if let Some(digit) = self.promotion_digit {
            token.push(char::from(b'0' + digit));
        }
        token.push_str(&self.suffix());
        token
    }
}

/// Decode an ICCF digit token into grid coordinates, promotion and trailing text.
pub fn decode_digit_move(token: &str) -> Result<MoveDescriptor, NotationError> {
    let caps = TOKEN_RE
        .captures(token)
        .ok_or_else(|| NotationError::malformed(token, "expected four leading digits"))?;

    let digit = |i: usize| -> u8 { caps[i].as_bytes()[0] - b'0' };

    let from = Square::from_iccf(digit(1), digit(2))
        .ok_or_else(|| NotationError::malformed(token, "source digits must be 1-8"))?;
    let to = Square::from_iccf(digit(3), digit(4))
        .ok_or_else(|| NotationError::malformed(token, "destination digits must be 1-8"))?;

    let promotion_digit = caps.get(5).map(|m| m.as_str().as_bytes()[0] - b'0');
    if promotion_digit.is_some_and(|d| d > 4) {
        return Err(NotationError::malformed(token, "promotion digit must be 0-4"));
    }
    let promotion = promotion_digit.and_then(Promotion::from_digit);

    // `0` spells out "no promotion", so `51710` is still a castle.
    let castle = if promotion.is_none() {
        CastleSide::from_iccf(&token[..4])
    } else {
        None
    };

    Ok(MoveDescriptor {
        from,
        to,
        promotion,
        promotion_digit,
        annotation: caps[6].to_string(),
        comment: caps[7].to_string(),
        castle,
    })
}

/// Encode grid coordinates back into a digit token.
pub fn encode_internal_to_digit(
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
    suffix: &str,
) -> String {
    let mut token = format!(
        "{}{}{}{}",
        from.iccf_file(),
        from.iccf_rank(),
        to.iccf_file(),
        to.iccf_rank()
    );
    if let Some(promo) = promotion {
        token.push(char::from(b'0' + promo.digit()));
    }
    token.push_str(suffix);
    token
}

/// Convert an internal move (`{col}{row}{col}{row}` or a castle tag) to ICCF.
/// Anything after the four coordinates is carried over unchanged.
pub fn internal_to_iccf(text: &str) -> Result<String, NotationError> {
    if let Some(side) = CastleSide::from_tag(text) {
        return Ok(side.iccf().to_string());
    }
    let (from, to, tail) = split_coords(text, 0..=7)?;
    let from = Square::new(from.1, from.0)
        .ok_or_else(|| NotationError::malformed(text, "internal digits must be 0-7"))?;
    let to = Square::new(to.1, to.0)
        .ok_or_else(|| NotationError::malformed(text, "internal digits must be 0-7"))?;
    Ok(encode_internal_to_digit(from, to, None, tail))
}

/// Convert an ICCF move to the internal encoding. Castle codes are converted as plain
/// king moves since the tag depends on the board.
pub fn iccf_to_internal(text: &str) -> Result<String, NotationError> {
    let (from, to, tail) = split_coords(text, 1..=8)?;
    let from = Square::from_iccf(from.0, from.1)
        .ok_or_else(|| NotationError::malformed(text, "coordinate digits must be 1-8"))?;
    let to = Square::from_iccf(to.0, to.1)
        .ok_or_else(|| NotationError::malformed(text, "coordinate digits must be 1-8"))?;
    Ok(format!(
        "{}{}{}{}{}",
        from.col, from.row, to.col, to.row, tail
    ))
}

/// Convert a whole internal move list to ICCF.
pub fn internal_game_to_iccf<S: AsRef<str>>(moves: &[S]) -> Result<Vec<String>, NotationError> {
    moves.iter().map(|m| internal_to_iccf(m.as_ref())).collect()
}

type Pair = (u8, u8);

fn split_coords(
    text: &str,
    range: std::ops::RangeInclusive<u8>,
) -> Result<(Pair, Pair, &str), NotationError> {
    let head = text
        .get(..4)
        .filter(|h| h.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| NotationError::malformed(text, "expected four leading digits"))?;
    let d: Vec<u8> = head.bytes().map(|b| b - b'0').collect();
    if !d.iter().all(|v| range.contains(v)) {
        return Err(NotationError::malformed(text, "coordinate digit out of range"));
    }
    Ok(((d[0], d[1]), (d[2], d[3]), &text[4..]))
}
