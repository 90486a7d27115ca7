//! Draw detection
//!
//! - Stalemate
//! - Fifty-move rule (claimable) and seventy-five-move rule (automatic)
//! - Repetition
//! - Insufficient material

use chess_core::{play_uci_moves, Color, PieceKind, Position};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).expect("test FEN must parse")
}

// =============================================================================
// Stalemate
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    let mut p = pos("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(p.legal_moves().is_empty());
    assert!(!p.in_check(Color::Black));
    assert!(p.is_stalemate());
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let mut p = pos("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert!(p.is_stalemate());
    assert!(p.is_game_over());
}

// =============================================================================
// Fifty-move rule
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let mut p = pos("8/8/8/4k3/8/4K3/8/8 w - - 100 60");
    assert!(p.is_fifty_move_draw());
    assert!(p.is_claimable_draw());
}

#[test]
fn test_fifty_move_rule_at_99_halfmoves_claimable_by_quiet_move() {
    let mut p = pos("8/8/8/4k3/8/4K3/4R3/8 w - - 99 60");
    assert!(!p.is_fifty_move_draw());
    assert!(p.can_claim_fifty_moves());
    assert!(p.is_claimable_draw());
    assert_eq!(p.halfmove_clock, 99);
}

#[test]
fn test_fifty_move_rule_at_98_halfmoves() {
    let mut p = pos("8/8/8/4k3/8/4K3/4R3/8 w - - 98 60");
    assert!(!p.can_claim_fifty_moves());
    assert!(!p.is_claimable_draw());
}

#[test]
fn test_fifty_move_claim_needs_a_non_zeroing_move() {
    // g8 is covered by the bishop, so Black can only push pawns
    let mut p = pos("7k/6pp/8/8/8/8/B7/K7 b - - 99 80");
    let moves = p.legal_moves();
    assert_eq!(moves.len(), 4);
    assert!(moves
        .iter()
        .all(|mv| p.piece_at(mv.from).map(|pc| pc.kind) == Some(PieceKind::Pawn)));
    assert!(!p.can_claim_fifty_moves());
}

#[test]
fn test_fifty_move_rule_reset_on_pawn_move() {
    let mut p = pos("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    play_uci_moves(&mut p, "e2e3").unwrap();
    assert_eq!(p.halfmove_clock, 0);
    assert!(!p.is_fifty_move_draw());
}

// =============================================================================
// Repetition
// =============================================================================

#[test]
fn test_threefold_repetition_is_claimable_not_final() {
    let mut p = pos("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    play_uci_moves(&mut p, "f3g1 c6b8 g1f3 b8c6 f3g1 c6b8 g1f3 b8c6").unwrap();
    assert_eq!(p.repetition_count(), 3);
    assert!(p.is_claimable_draw());
    assert!(!p.is_game_over());
}

#[test]
fn test_threefold_claimable_one_move_early() {
    let mut p = pos("4k3/8/8/8/8/8/Q7/4K3 w - - 0 1");
    play_uci_moves(&mut p, "a2b2 e8d8 b2a2 d8e8 a2b2 e8d8 b2a2").unwrap();
    assert_eq!(p.repetition_count(), 2);
    // d8e8 would bring the start position back a third time
    assert!(p.can_claim_threefold_repetition());
    assert!(p.is_claimable_draw());
    assert_eq!(p.ply_count(), 7);
}

#[test]
fn test_repetition_forgotten_after_undo() {
    let mut p = Position::startpos();
    play_uci_moves(&mut p, "g1f3 g8f6 f3g1 f6g8 g1f3 g8f6 f3g1 f6g8").unwrap();
    assert!(p.is_claimable_draw());
    p.undo();
    p.undo();
    p.undo();
    p.undo();
    assert_eq!(p.repetition_count(), 2);
    assert!(!p.is_claimable_draw());
}

// =============================================================================
// Insufficient material
// =============================================================================

#[test]
fn test_insufficient_material_king_vs_king() {
    assert!(pos("8/8/8/4k3/8/4K3/8/8 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_insufficient_material_single_minor() {
    assert!(pos("8/8/8/4k3/8/4KB2/8/8 w - - 0 1").is_insufficient_material());
    assert!(pos("8/8/8/4k3/8/4KN2/8/8 w - - 0 1").is_insufficient_material());
    assert!(pos("8/8/4b3/4k3/8/4K3/8/8 w - - 0 1").is_insufficient_material());
    assert!(pos("8/8/4n3/4k3/8/4K3/8/8 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_insufficient_material_same_color_bishops() {
    // c1 and f8 are both dark squares
    assert!(pos("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_sufficient_material_opposite_color_bishops() {
    // c1 dark, c8 light
    assert!(!pos("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_sufficient_material_knight_against_minor() {
    // the bishop can block a flight square, so the knight could mate
    let p = pos("8/8/4b3/4k3/8/4KN2/8/8 w - - 0 1");
    assert!(!p.has_insufficient_material(Color::White));
    assert!(!p.is_insufficient_material());
}

#[test]
fn test_sufficient_material_with_heavy_pieces_or_pawns() {
    assert!(!pos("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1").is_insufficient_material());
    assert!(!pos("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1").is_insufficient_material());
    assert!(!pos("8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_sufficient_material_two_knights() {
    assert!(!pos("8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1").is_insufficient_material());
}

#[test]
fn test_insufficient_material_ends_game() {
    let mut p = pos("8/8/8/4k3/8/4K3/8/8 w - - 0 1");
    assert!(p.is_game_over());
    assert!(!p.is_checkmate());
}
