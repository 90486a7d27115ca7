//! Zobrist keys for repetition detection.
//!
//! A position key XORs one random value per occupied (piece, square) pair,
//! one for Black to move, one per castling right held and one for the
//! en-passant file when a pawn stands ready to capture there. Clocks are not part of the key, so the same placement
//! reached at different move numbers compares equal.

use crate::board::Position;
use crate::types::{file_of, rank_of, sq, Color, Piece, PieceKind};

pub struct ZobristKeys {
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    pub black_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    pub en_passant_file: [u64; 8],
}

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

impl ZobristKeys {
    /// Fills every table from one fixed-seed xorshift stream, at compile time.
    pub const fn generate(seed: u64) -> Self {
        let mut state = seed;
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            state = xorshift64(state);
            pieces[i / 384][(i / 64) % 6][i % 64] = state;
            i += 1;
        }

        state = xorshift64(state);
        let black_to_move = state;

        let mut castling = [0u64; 4];
        let mut c = 0;
        while c < 4 {
            state = xorshift64(state);
            castling[c] = state;
            c += 1;
        }

        let mut en_passant_file = [0u64; 8];
        let mut f = 0;
        while f < 8 {
            state = xorshift64(state);
            en_passant_file[f] = state;
            f += 1;
        }

        ZobristKeys {
            pieces,
            black_to_move,
            castling,
            en_passant_file,
        }
    }

    #[inline]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Full key of a position, computed from scratch.
    pub fn position_key(&self, pos: &Position) -> u64 {
        let mut key = 0u64;
        for sq in 0..64u8 {
            if let Some(pc) = pos.piece_at(sq) {
                key ^= self.piece_key(pc, sq);
            }
        }
        if pos.side_to_move == Color::Black {
            key ^= self.black_to_move;
        }
        let rights = [
            pos.castling.wk,
            pos.castling.wq,
            pos.castling.bk,
            pos.castling.bq,
        ];
        for (held, k) in rights.iter().zip(self.castling.iter()) {
            if *held {
                key ^= k;
            }
        }
        if let Some(ep) = pos.en_passant.filter(|&ep| ep_capturable(pos, ep)) {
            key ^= self.en_passant_file[file_of(ep) as usize];
        }
        key
    }
}

/// A pawn of the side to move sits diagonally behind `ep` and could take
/// there. Pins are not considered.
fn ep_capturable(pos: &Position, ep: u8) -> bool {
    let us = pos.side_to_move;
    let behind = match us {
        Color::White => rank_of(ep) - 1,
        Color::Black => rank_of(ep) + 1,
    };
    [-1, 1].iter().any(|&df| {
        sq(file_of(ep) + df, behind)
            .and_then(|s| pos.piece_at(s))
            .map_or(false, |pc| pc.color == us && pc.kind == PieceKind::Pawn)
    })
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::generate(0x123456789ABCDEF0);

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
