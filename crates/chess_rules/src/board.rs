use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::types::*;

const fn back_rank(color: Color) -> [Option<Piece>; 8] {
    [
        Some(Piece::new(color, PieceKind::Rook)),
        Some(Piece::new(color, PieceKind::Knight)),
        Some(Piece::new(color, PieceKind::Bishop)),
        Some(Piece::new(color, PieceKind::Queen)),
        Some(Piece::new(color, PieceKind::King)),
        Some(Piece::new(color, PieceKind::Bishop)),
        Some(Piece::new(color, PieceKind::Knight)),
        Some(Piece::new(color, PieceKind::Rook)),
    ]
}

const fn pawn_rank(color: Color) -> [Option<Piece>; 8] {
    [Some(Piece::new(color, PieceKind::Pawn)); 8]
}

/// Standard starting position, row 0 = rank 8.
pub const INITIAL_LAYOUT: [[Option<Piece>; 8]; 8] = [
    back_rank(Color::Black),
    pawn_rank(Color::Black),
    [None; 8],
    [None; 8],
    [None; 8],
    [None; 8],
    pawn_rank(Color::White),
    back_rank(Color::White),
];

/// 8x8 grid of optional pieces, indexed `[row][col]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

/// Everything needed to take back one applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    pub from: Square,
    pub to: Square,
    pub moved: Piece,
    /// Piece that stood on `to`, if any.
    pub captured: Option<Piece>,
    /// Square and pawn removed by an en-passant capture.
    pub en_passant: Option<(Square, Piece)>,
}

impl Undo {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some() || self.en_passant.is_some()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    pub fn startpos() -> Self {
        Board {
            squares: INITIAL_LAYOUT,
        }
    }

    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Parse the piece-placement field of a FEN string (rank 8 first).
    pub fn from_placement(placement: &str) -> Result<Self, RulesError> {
        let placement = placement.split_whitespace().next().unwrap_or("");
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(RulesError::InvalidPlacement(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            for ch in text.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if d == 0 || d > 8 {
                        return Err(RulesError::InvalidPlacement(format!(
                            "bad empty-run digit {ch:?} in {text:?}"
                        )));
                    }
                    col += d as usize;
                } else {
                    let piece = Piece::from_char(ch).ok_or_else(|| {
                        RulesError::InvalidPlacement(format!("unknown piece {ch:?}"))
                    })?;
                    if col >= 8 {
                        return Err(RulesError::InvalidPlacement(format!(
                            "too many files in {text:?}"
                        )));
                    }
                    board.squares[row][col] = Some(piece);
                    col += 1;
                }
                if col > 8 {
                    return Err(RulesError::InvalidPlacement(format!(
                        "too many files in {text:?}"
                    )));
                }
            }
            if col != 8 {
                return Err(RulesError::InvalidPlacement(format!(
                    "not enough files in {text:?}"
                )));
            }
        }
        Ok(board)
    }

    /// Inverse of [`Board::from_placement`].
    pub fn to_placement(&self) -> String {
        let mut out = String::new();
        for (row, rank) in self.squares.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0;
            for sq in rank {
                match sq {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
        }
        out
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row as usize][sq.col as usize]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.row as usize][sq.col as usize] = pc;
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Occupied squares of one color, row-major.
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(pc) if pc.color == color => Some((sq, pc)),
            _ => None,
        })
    }

    pub fn king_sq(&self, color: Color) -> Option<Square> {
        self.squares_of(color)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count_kings(&self, color: Color) -> usize {
        self.squares_of(color)
            .filter(|(_, pc)| pc.kind == PieceKind::King)
            .count()
    }

    /// Move the piece on `from` to `to` without any legality checks.
    ///
    /// A pawn stepping diagonally onto an empty square is an en-passant
    /// capture: the pawn beside `from` in the column of `to` is removed.
    /// Returns `None` if `from` is empty.
    pub fn make_move(&mut self, from: Square, to: Square) -> Option<Undo> {
        let moved = self.piece_at(from)?;
        let captured = self.piece_at(to);

        let mut en_passant = None;
        if moved.kind == PieceKind::Pawn && from.col != to.col && captured.is_none() {
            let cs = Square::new(from.row, to.col);
            if let Some(pawn) = self.piece_at(cs)
                && pawn.kind == PieceKind::Pawn
                && pawn.color != moved.color
            {
                self.set_piece(cs, None);
                en_passant = Some((cs, pawn));
            }
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(moved));

        Some(Undo {
            from,
            to,
            moved,
            captured,
            en_passant,
        })
    }

    pub fn unmake_move(&mut self, undo: &Undo) {
        self.set_piece(undo.to, undo.captured);
        self.set_piece(undo.from, Some(undo.moved));
        if let Some((cs, pawn)) = undo.en_passant {
            self.set_piece(cs, Some(pawn));
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, rank) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for (col, sq) in rank.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match sq {
                    Some(pc) => write!(f, "{}", pc.to_char())?,
                    None => f.write_str(".")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// A move applied to a borrowed board that is taken back when dropped.
///
/// Probes (self-check tests, checkmate search) read the board through
/// [`ScopedMove::board`] and simply let the guard go out of scope. A move
/// that should stay on the board is kept with [`ScopedMove::commit`].
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    undo: Undo,
    committed: bool,
}

impl<'a> ScopedMove<'a> {
    /// Returns `None` (board untouched) if `from` is empty.
    pub fn apply(board: &'a mut Board, from: Square, to: Square) -> Option<Self> {
        let undo = board.make_move(from, to)?;
        Some(Self {
            board,
            undo,
            committed: false,
        })
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    pub fn undo(&self) -> &Undo {
        &self.undo
    }

    pub fn commit(mut self) -> Undo {
        self.committed = true;
        self.undo
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.board.unmake_move(&self.undo);
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
