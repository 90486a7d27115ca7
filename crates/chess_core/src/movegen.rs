use crate::{board::Position, types::*};

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn pawn_dir(c: Color) -> i8 {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

impl Position {
    /// All legal moves for the side to move. The position is used as scratch
    /// space for the king-safety test and is unchanged on return.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        legal_moves_into(self, &mut out);
        out
    }

    /// Stops at the first legal move found.
    pub fn has_legal_moves(&mut self) -> bool {
        let mut pseudo = Vec::with_capacity(64);
        pseudo_moves(self, &mut pseudo);
        let mover = self.side_to_move;
        pseudo.into_iter().any(|mv| {
            self.make_move(mv, 0);
            let legal = !self.in_check(mover);
            self.undo();
            legal
        })
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);
        let holds = |s: Option<u8>, kinds: &[PieceKind]| {
            s.and_then(|s| self.piece_at(s))
                .map_or(false, |pc| pc.color == by && kinds.contains(&pc.kind))
        };

        // a pawn of `by` attacks from one rank behind its direction of travel
        let back = -pawn_dir(by);
        if holds(sq(tf - 1, tr + back), &[PieceKind::Pawn])
            || holds(sq(tf + 1, tr + back), &[PieceKind::Pawn])
        {
            return true;
        }
        if KNIGHT_STEPS
            .iter()
            .any(|&(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_STEPS
            .iter()
            .any(|&(df, dr)| holds(sq(tf + df, tr + dr), &[PieceKind::King]))
        {
            return true;
        }

        let ray_hits = |dirs: &[(i8, i8)], kinds: &[PieceKind]| {
            dirs.iter().any(|&(df, dr)| {
                let (mut f, mut r) = (tf + df, tr + dr);
                while let Some(s) = sq(f, r) {
                    if let Some(pc) = self.piece_at(s) {
                        return pc.color == by && kinds.contains(&pc.kind);
                    }
                    f += df;
                    r += dr;
                }
                false
            })
        };
        ray_hits(&DIAGONALS, &[PieceKind::Bishop, PieceKind::Queen])
            || ray_hits(&ORTHOGONALS, &[PieceKind::Rook, PieceKind::Queen])
    }
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        pos.make_move(mv, 0);
        let illegal = pos.in_check(mover);
        pos.undo();
        !illegal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        if pc.color != us {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => gen_steps(pos, from, us, &KNIGHT_STEPS, out),
            PieceKind::Bishop => gen_rays(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => gen_rays(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_rays(pos, from, us, &DIAGONALS, out);
                gen_rays(pos, from, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, us, &KING_STEPS, out);
                gen_castles(pos, from, us, out);
            }
        }
    }
}

fn push_pawn_move(from: u8, to: u8, out: &mut Vec<Move>) {
    if rank_of(to) == 0 || rank_of(to) == 7 {
        out.extend(PieceKind::PROMOTIONS.iter().map(|&k| Move::promoting(from, to, k)));
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = pawn_dir(c);
    let start_rank = if c == Color::White { 1 } else { 6 };

    if let Some(one) = sq(f, r + dir).filter(|&s| pos.piece_at(s).is_none()) {
        push_pawn_move(from, one, out);
        if r == start_rank {
            if let Some(two) = sq(f, r + 2 * dir).filter(|&s| pos.piece_at(s).is_none()) {
                out.push(Move::new(from, two));
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(victim) if victim.color != c => push_pawn_move(from, to, out),
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            _ => {}
        }
    }
}

fn gen_steps(pos: &Position, from: u8, c: Color, steps: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    for &(df, dr) in steps {
        if let Some(to) = sq(f + df, r + dr) {
            if pos.piece_at(to).map_or(true, |pc| pc.color != c) {
                out.push(Move::new(from, to));
            }
        }
    }
}

fn gen_rays(pos: &Position, from: u8, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let (mut f, mut r) = (file_of(from) + df, rank_of(from) + dr);
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != c {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling: right held, path empty, king not in, through or into check.
fn gen_castles(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (home, king_side, queen_side) = match c {
        Color::White => (4u8, pos.castling.wk, pos.castling.wq),
        Color::Black => (60u8, pos.castling.bk, pos.castling.bq),
    };
    if from != home || pos.in_check(c) {
        return;
    }
    let enemy = c.other();
    let empty = |squares: &[u8]| squares.iter().all(|&s| pos.piece_at(s).is_none());
    let safe = |squares: &[u8]| squares.iter().all(|&s| !pos.is_square_attacked(s, enemy));

    if king_side && empty(&[home + 1, home + 2]) && safe(&[home + 1, home + 2]) {
        out.push(Move {
            is_castle: true,
            ..Move::new(home, home + 2)
        });
    }
    if queen_side && empty(&[home - 1, home - 2, home - 3]) && safe(&[home - 1, home - 2]) {
        out.push(Move {
            is_castle: true,
            ..Move::new(home, home - 2)
        });
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
