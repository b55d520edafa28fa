//! Move notation: `<piece><from><x?><to>`, e.g. `e2e4`, `Ng1f3`, `Bc4xf7`.
//!
//! No disambiguation and no `+`/`#` suffixes.

use crate::{error::RulesError, types::*};

pub fn file_char(col: u8) -> char {
    (b'a' + col) as char
}

/// Row 0 is rank 8.
pub fn rank_char(row: u8) -> char {
    (b'8' - row) as char
}

pub fn square_name(sq: Square) -> String {
    format!("{}{}", file_char(sq.col), rank_char(sq.row))
}

pub fn parse_square(name: &str) -> Result<Square, RulesError> {
    let b = name.trim().as_bytes();
    if b.len() != 2 {
        return Err(RulesError::InvalidSquare(name.to_string()));
    }
    let f = b[0].to_ascii_lowercase();
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return Err(RulesError::InvalidSquare(name.to_string()));
    }
    Ok(Square::new(b'8' - r, f - b'a'))
}

pub fn encode(from: Square, to: Square, piece: Piece, is_capture: bool) -> String {
    let mut out = String::with_capacity(6);
    if let Some(letter) = piece.kind.letter() {
        out.push(letter);
    }
    out.push(file_char(from.col));
    out.push(rank_char(from.row));
    if is_capture {
        out.push('x');
    }
    out.push(file_char(to.col));
    out.push(rank_char(to.row));
    out
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
