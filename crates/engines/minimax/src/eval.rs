//! Static evaluation: material, piece-square bonuses and mobility.
//!
//! Scores are always from White's point of view, whoever is to move.

use chess_core::{mirror_sq, Color, PieceKind};

use crate::rules::{Ply, Rules};

pub type Score = i32;

/// Reserved score for a side that has been mated. No material or
/// positional sum comes close.
pub const MATE_SCORE: Score = 999_999;

/// Centipawns per extra legal move.
pub const MOBILITY_WEIGHT: Score = 10;

/// Material values in centipawns, indexed by `PieceKind::idx()`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
pub const PIECE_VALUES: [Score; 6] = [100, 320, 330, 500, 900, 20_000];

pub type SquareTable = [Score; 64];

/// Pawn bonuses for White, index 0 = a1. Black reads the table through
/// `mirror_sq`.
#[rustfmt::skip]
pub const PAWN_TABLE: SquareTable = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

pub const GENERIC_TABLE: SquareTable = [0; 64];

#[inline]
pub fn piece_value(kind: PieceKind) -> Score {
    PIECE_VALUES[kind.idx()]
}

pub fn square_table(kind: PieceKind) -> &'static SquareTable {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        _ => &GENERIC_TABLE,
    }
}

/// Positional bonus of a `color` piece of `kind` on `sq`, unsigned.
pub fn square_bonus(kind: PieceKind, color: Color, sq: u8) -> Score {
    let idx = match color {
        Color::White => sq,
        Color::Black => mirror_sq(sq),
    };
    square_table(kind)[idx as usize]
}

/// Evaluates the position from White's perspective.
///
/// Mate returns `±MATE_SCORE`, any drawn or claimable-draw position 0.
/// Otherwise material + square bonuses + `MOBILITY_WEIGHT` times the
/// difference in legal move counts. The position is borrowed mutably to
/// count the opponent's moves behind a passed turn, and is unchanged on
/// return.
pub fn evaluate<R: Rules + ?Sized>(rules: &mut R) -> Score {
    if rules.is_checkmate() {
        return match rules.side_to_move() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        };
    }
    if rules.is_stalemate() || rules.is_insufficient_material() || rules.is_claimable_draw() {
        return 0;
    }

    material_and_squares(&*rules) + mobility(rules)
}

/// Material plus piece-square bonuses, signed by colour.
pub fn material_and_squares<R: Rules + ?Sized>(rules: &R) -> Score {
    (0..64u8)
        .filter_map(|sq| rules.piece_at(sq).map(|pc| (sq, pc)))
        .map(|(sq, pc)| {
            let v = piece_value(pc.kind) + square_bonus(pc.kind, pc.color, sq);
            match pc.color {
                Color::White => v,
                Color::Black => -v,
            }
        })
        .sum()
}

/// `MOBILITY_WEIGHT * (white_moves - black_moves)`.
pub fn mobility<R: Rules + ?Sized>(rules: &mut R) -> Score {
    let to_move = rules.side_to_move();
    let own = rules.legal_moves().len() as Score;
    let other = {
        let mut passed = Ply::pass(rules);
        passed.legal_moves().len() as Score
    };

    let (white, black) = match to_move {
        Color::White => (own, other),
        Color::Black => (other, own),
    };
    MOBILITY_WEIGHT * (white - black)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
