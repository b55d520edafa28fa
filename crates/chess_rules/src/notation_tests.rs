use super::*;

#[test]
fn test_square_names() {
    assert_eq!(square_name(Square::new(0, 0)), "a8");
    assert_eq!(square_name(Square::new(7, 7)), "h1");
    assert_eq!(square_name(Square::new(6, 4)), "e2");
}

#[test]
fn test_parse_square() {
    assert_eq!(parse_square("e2"), Ok(Square::new(6, 4)));
    assert_eq!(parse_square("A8"), Ok(Square::new(0, 0)));
    assert_eq!(parse_square(" h1 "), Ok(Square::new(7, 7)));
    assert!(parse_square("i1").is_err());
    assert!(parse_square("a9").is_err());
    assert!(parse_square("a").is_err());
    assert!(parse_square("e2e4").is_err());
}

#[test]
fn test_encode_pawn_push_has_no_letter() {
    let pawn = Piece::new(Color::White, PieceKind::Pawn);
    assert_eq!(encode(Square::new(6, 4), Square::new(4, 4), pawn, false), "e2e4");
}

#[test]
fn test_encode_piece_moves_and_captures() {
    let knight = Piece::new(Color::White, PieceKind::Knight);
    assert_eq!(encode(Square::new(7, 6), Square::new(5, 5), knight, false), "Ng1f3");

    let queen = Piece::new(Color::White, PieceKind::Queen);
    assert_eq!(encode(Square::new(3, 7), Square::new(1, 5), queen, true), "Qh5xf7");

    let pawn = Piece::new(Color::Black, PieceKind::Pawn);
    assert_eq!(encode(Square::new(4, 3), Square::new(5, 4), pawn, true), "d4xe3");

    let king = Piece::new(Color::Black, PieceKind::King);
    assert_eq!(encode(Square::new(0, 4), Square::new(1, 4), king, false), "Ke8e7");
}
