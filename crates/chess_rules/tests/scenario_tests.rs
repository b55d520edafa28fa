//! Whole-game scenarios driven through the public `Game` API.
//!
//! - Scholar's mate
//! - En passant from the opening push
//! - Reset after play
//! - Snapshots for front ends

use chess_rules::{
    Board, Color, Game, GameSnapshot, MoveResult, Piece, PieceKind, Rejection, Square,
    is_king_attacked, is_valid_move, parse_square,
};

fn sq(name: &str) -> Square {
    parse_square(name).unwrap()
}

fn play(game: &mut Game, mv: &str) -> MoveResult {
    let (from, to) = mv.split_at(2);
    game.apply_move(sq(from), sq(to))
}

/// Count the moves of `color` that leave its king safe, trying every
/// origin/destination pair on a separate copy of the board.
fn count_escapes(game: &Game, color: Color) -> usize {
    let mut count = 0;
    for from in Square::all() {
        if game.board().piece_at(from).map(|p| p.color) != Some(color) {
            continue;
        }
        for to in Square::all() {
            if !is_valid_move(game.board(), game.last_move(), from, to) {
                continue;
            }
            let mut copy = game.board().clone();
            copy.make_move(from, to).unwrap();
            if !is_king_attacked(&copy, game.last_move(), color).unwrap() {
                count += 1;
            }
        }
    }
    count
}

// =============================================================================
// Checkmate
// =============================================================================

#[test]
fn test_scholars_mate() {
    let mut game = Game::new();
    for mv in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"] {
        let result = play(&mut game, mv);
        assert!(result.applied(), "{mv} should be legal");
        assert!(!result.check(), "{mv} gives no check");
    }

    let result = play(&mut game, "h5f7");
    assert!(result.check(), "Qxf7 gives check");
    assert!(result.checkmate(), "Qxf7 is mate");
    assert!(game.is_checkmate(Color::Black));
    assert!(!game.is_checkmate(Color::White));
    assert_eq!(count_escapes(&game, Color::Black), 0);

    assert_eq!(
        game.move_history(),
        ["e2e4", "e7e5", "Bf1c4", "Nb8c6", "Qd1h5", "Ng8f6", "Qh5xf7"]
    );
    assert_eq!(game.move_number(), 4);
    assert_eq!(game.turn(), Color::Black);
}

#[test]
fn test_scholars_mate_defended() {
    // Same idea, but black has played ...Qe7 so f7 is covered.
    let mut game = Game::new();
    for mv in ["e2e4", "e7e5", "f1c4", "d8e7", "d1h5", "g8f6"] {
        assert!(play(&mut game, mv).applied(), "{mv} should be legal");
    }
    let result = play(&mut game, "h5f7");
    assert!(result.check());
    assert!(!result.checkmate(), "Qe7xf7 or Kd8 escapes");
    assert!(count_escapes(&game, Color::Black) >= 2);
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();
    for mv in ["f2f3", "e7e5", "g2g4"] {
        assert!(play(&mut game, mv).applied(), "{mv} should be legal");
    }
    let result = play(&mut game, "d8h4");
    assert_eq!(result.notation(), Some("Qd8h4"));
    assert!(result.checkmate());
    assert!(game.is_king_in_check(Color::White));
    assert_eq!(count_escapes(&game, Color::White), 0);
}

// =============================================================================
// En passant
// =============================================================================

#[test]
fn test_en_passant_from_opening_push() {
    let mut game = Game::new();
    for mv in ["a2a3", "d7d5", "a3a4", "d5d4"] {
        assert!(play(&mut game, mv).applied(), "{mv} should be legal");
    }
    assert_eq!(
        game.board().piece_at(Square::new(4, 3)),
        Some(Piece::new(Color::Black, PieceKind::Pawn))
    );

    // White king pawn (6,4) -> (4,4) lands beside the black pawn on (4,3).
    assert!(game.apply_move(Square::new(6, 4), Square::new(4, 4)).applied());

    let result = game.apply_move(Square::new(4, 3), Square::new(5, 4));
    assert!(result.applied(), "en passant must succeed");
    assert!(game.board().is_empty(Square::new(4, 4)), "captured pawn cleared");
    assert_eq!(result.notation(), Some("d4xe3"));
}

#[test]
fn test_en_passant_not_after_single_steps() {
    let mut game = Game::new();
    for mv in ["a2a3", "d7d5", "a3a4", "d5d4", "e2e3", "h7h6", "e3e4"] {
        assert!(play(&mut game, mv).applied(), "{mv} should be legal");
    }
    assert_eq!(
        play(&mut game, "d4e3").rejection(),
        Some(Rejection::IllegalMove)
    );
}

// =============================================================================
// Turn order and destinations
// =============================================================================

#[test]
fn test_vacated_square_cannot_move_again() {
    let mut game = Game::new();
    assert!(game.apply_move(Square::new(6, 4), Square::new(4, 4)).applied());
    let again = game.apply_move(Square::new(6, 4), Square::new(4, 4));
    assert!(!again.applied());
}

#[test]
fn test_legal_destinations_idempotent() {
    let mut game = Game::new();
    play(&mut game, "e2e4");
    play(&mut game, "e7e5");
    for square in Square::all() {
        let first = game.legal_destinations(square);
        let second = game.legal_destinations(square);
        assert_eq!(first, second, "destinations of {square} must be stable");
        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted, "destinations of {square} must be row-major");
    }
}

#[test]
fn test_startpos_has_twenty_moves() {
    let game = Game::new();
    let total: usize = game
        .board()
        .squares_of(Color::White)
        .map(|(square, _)| game.legal_destinations(square).len())
        .sum();
    assert_eq!(total, 20);
}

// =============================================================================
// Reset and snapshots
// =============================================================================

#[test]
fn test_reset_restores_initial_layout() {
    let mut game = Game::new();
    for mv in ["e2e4", "d7d5", "e4d5", "d8d5", "b1c3"] {
        assert!(play(&mut game, mv).applied(), "{mv} should be legal");
    }
    assert_ne!(game.board(), &Board::startpos());

    game.reset();
    assert_eq!(game.board(), &Board::startpos());
    assert!(game.move_history().is_empty());
    assert!(game.last_move().is_none());
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.move_number(), 1);
}

#[test]
fn test_snapshot_is_a_deep_copy() {
    let mut game = Game::new();
    let snap = game.snapshot();
    play(&mut game, "g1f3");
    assert_eq!(snap.board, Board::startpos());
    assert!(snap.history.is_empty());
    assert_eq!(game.board_snapshot(), *game.board());
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut game = Game::new();
    play(&mut game, "e2e4");
    play(&mut game, "c7c5");

    let snap = game.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"turn\":\"white\""), "{json}");
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn test_snapshot_rejects_off_board_square() {
    let mut game = Game::new();
    play(&mut game, "e2e4");
    let json = serde_json::to_string(&game.snapshot()).unwrap();

    let bad = json.replace("\"row\":4", "\"row\":9");
    assert_ne!(bad, json, "last move should serialize its row");
    let err = serde_json::from_str::<GameSnapshot>(&bad).unwrap_err();
    assert!(err.to_string().contains("out of range"), "{err}");

    let square: Square = serde_json::from_str(r#"{"row":7,"col":7}"#).unwrap();
    assert_eq!(square, sq("h1"));
    assert!(serde_json::from_str::<Square>(r#"{"row":0,"col":8}"#).is_err());
}
