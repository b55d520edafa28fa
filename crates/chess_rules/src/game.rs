//! Turn order, move application and check/checkmate evaluation.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace};

use crate::{
    attacks::is_king_attacked,
    board::{Board, ScopedMove},
    error::RulesError,
    notation,
    rules::{is_valid_move, legal_destinations},
    types::*,
};

/// Input state: either nothing is selected or a piece of the side to move is,
/// together with its destinations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    AwaitingSelection,
    PieceSelected {
        square: Square,
        destinations: Vec<Square>,
    },
}

/// Why a move was refused. None of these change the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// The origin square is empty.
    NoPiece,
    /// The piece belongs to the side not on move.
    NotYourTurn,
    /// The piece cannot move that way.
    IllegalMove,
    /// The move would leave the mover's own king attacked.
    ExposesKing,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Rejection::NoPiece => "no piece on the origin square",
            Rejection::NotYourTurn => "that piece belongs to the other side",
            Rejection::IllegalMove => "illegal move",
            Rejection::ExposesKing => "move would leave the king in check",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    Applied {
        notation: String,
        /// The side now to move is in check.
        check: bool,
        /// ... and has no move out of it.
        checkmate: bool,
    },
    Rejected(Rejection),
}

impl MoveResult {
    pub fn applied(&self) -> bool {
        matches!(self, MoveResult::Applied { .. })
    }

    pub fn check(&self) -> bool {
        matches!(self, MoveResult::Applied { check: true, .. })
    }

    pub fn checkmate(&self) -> bool {
        matches!(self, MoveResult::Applied { checkmate: true, .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            MoveResult::Rejected(r) => Some(*r),
            MoveResult::Applied { .. } => None,
        }
    }

    pub fn notation(&self) -> Option<&str> {
        match self {
            MoveResult::Applied { notation, .. } => Some(notation),
            MoveResult::Rejected(_) => None,
        }
    }
}

/// Deep copy of everything a front end needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub turn: Color,
    pub last_move: Option<MoveRecord>,
    pub history: Vec<String>,
    pub move_number: u32,
}

/// A two-player game. All mutation goes through [`Game::apply_move`],
/// [`Game::select_piece`] and [`Game::reset`].
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    last_move: Option<MoveRecord>,
    history: Vec<String>,
    move_number: u32,
    selection: Selection,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::startpos(),
            turn: Color::White,
            last_move: None,
            history: Vec::new(),
            move_number: 1,
            selection: Selection::AwaitingSelection,
        }
    }

    /// Start from an arbitrary piece placement (FEN placement field).
    ///
    /// Each side must have exactly one king, and the side not on move must
    /// not be in check (its king could otherwise be captured).
    pub fn from_placement(placement: &str, turn: Color) -> Result<Self, RulesError> {
        let board = Board::from_placement(placement)?;
        for color in [Color::White, Color::Black] {
            let count = board.count_kings(color);
            if count != 1 {
                return Err(RulesError::KingCount { color, count });
            }
        }
        if is_king_attacked(&board, None, turn.other())? {
            return Err(RulesError::OpponentInCheck(turn.other()));
        }
        Ok(Self {
            board,
            turn,
            ..Self::new()
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        info!("game reset");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            turn: self.turn,
            last_move: self.last_move,
            history: self.history.clone(),
            move_number: self.move_number,
        }
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    pub fn move_history(&self) -> &[String] {
        &self.history
    }

    /// Full-move number, starting at 1 and advancing after each black move.
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Destinations of the piece on `sq` by movement rules alone, row-major.
    /// Moves that would expose the king are included; `apply_move` refuses them.
    pub fn legal_destinations(&self, sq: Square) -> Vec<Square> {
        legal_destinations(&self.board, self.last_move, sq)
    }

    /// Select the piece on `sq` if it belongs to the side to move. Otherwise
    /// the selection is cleared and `None` returned.
    pub fn select_piece(&mut self, sq: Square) -> Option<&Selection> {
        match self.board.piece_at(sq) {
            Some(pc) if pc.color == self.turn => {
                let destinations = self.legal_destinations(sq);
                debug!(square = %sq, count = destinations.len(), "piece selected");
                self.selection = Selection::PieceSelected {
                    square: sq,
                    destinations,
                };
                Some(&self.selection)
            }
            _ => {
                debug!(square = %sq, "nothing selectable");
                self.selection = Selection::AwaitingSelection;
                None
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::AwaitingSelection;
    }

    /// Try to play `from -> to` for the side to move.
    ///
    /// The move is first played tentatively; if the mover's king would be
    /// attacked afterwards it is taken back and refused. Checkmate does not
    /// end the game: further moves are still accepted.
    ///
    /// Panics if a square was built by hand with a coordinate of 8 or more.
    pub fn apply_move(&mut self, from: Square, to: Square) -> MoveResult {
        self.selection = Selection::AwaitingSelection;

        let piece = match self.board.piece_at(from) {
            Some(p) => p,
            None => return reject(from, to, Rejection::NoPiece),
        };
        if piece.color != self.turn {
            return reject(from, to, Rejection::NotYourTurn);
        }
        if !is_valid_move(&self.board, self.last_move, from, to) {
            return reject(from, to, Rejection::IllegalMove);
        }

        let probe = match ScopedMove::apply(&mut self.board, from, to) {
            Some(p) => p,
            None => return reject(from, to, Rejection::NoPiece),
        };
        if king_in_check(probe.board(), self.last_move, self.turn) {
            drop(probe);
            return reject(from, to, Rejection::ExposesKing);
        }
        let undo = probe.commit();

        let notation = notation::encode(from, to, piece, undo.is_capture());
        self.last_move = Some(MoveRecord { piece, from, to });
        self.history.push(notation.clone());
        if self.turn == Color::Black {
            self.move_number += 1;
        }
        self.turn = self.turn.other();

        let check = king_in_check(&self.board, self.last_move, self.turn);
        let checkmate = check && checkmate_on(&mut self.board, self.last_move, self.turn);

        debug!(%notation, check, checkmate, "move applied");
        if checkmate {
            info!(winner = %self.turn.other(), %notation, "checkmate");
        }

        MoveResult::Applied {
            notation,
            check,
            checkmate,
        }
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        king_in_check(&self.board, self.last_move, color)
    }

    /// True if `color` is in check and every move of every piece of `color`
    /// still leaves its king attacked. False whenever `color` is not in check.
    pub fn is_checkmate(&self, color: Color) -> bool {
        // probe on a scratch copy so queries stay `&self`
        let mut scratch = self.board.clone();
        checkmate_on(&mut scratch, self.last_move, color)
    }
}

fn reject(from: Square, to: Square, why: Rejection) -> MoveResult {
    debug!(%from, %to, reason = ?why, "move rejected");
    MoveResult::Rejected(why)
}

/// A missing king cannot arise from a validly constructed game; it is logged
/// and reported as "not in check".
fn king_in_check(board: &Board, last_move: Option<MoveRecord>, color: Color) -> bool {
    match is_king_attacked(board, last_move, color) {
        Ok(attacked) => attacked,
        Err(e) => {
            error!(error = %e, "king lookup failed");
            false
        }
    }
}

/// Search for any move of `color` that ends the check, probing each one on
/// `board` and taking it back immediately.
fn checkmate_on(board: &mut Board, last_move: Option<MoveRecord>, color: Color) -> bool {
    if !king_in_check(board, last_move, color) {
        return false;
    }

    let origins: Vec<Square> = board.squares_of(color).map(|(sq, _)| sq).collect();
    let mut probes = 0u32;
    for from in origins {
        for to in legal_destinations(board, last_move, from) {
            probes += 1;
            let Some(probe) = ScopedMove::apply(board, from, to) else {
                continue;
            };
            let escapes = !king_in_check(probe.board(), last_move, color);
            drop(probe);
            if escapes {
                trace!(probes, %from, %to, "check can be escaped");
                return false;
            }
        }
    }
    trace!(probes, %color, "no escape from check");
    true
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
