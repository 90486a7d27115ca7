use std::fmt;

use crate::{board::Position, error::ChessError, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(p.to_char());
    }
    s
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_uci(*self))
    }
}

/// Resolves long algebraic text (`e2e4`, `e7e8q`) against the legal moves,
/// so castle and en-passant flags come out right.
pub fn parse_uci_move(pos: &mut Position, txt: &str) -> Result<Move, ChessError> {
    let unknown = || ChessError::UnknownMove {
        text: txt.to_string(),
    };
    let from = txt.get(0..2).and_then(coord_to_sq).ok_or_else(unknown)?;
    let to = txt.get(2..4).and_then(coord_to_sq).ok_or_else(unknown)?;
    let promo = match txt.get(4..) {
        None | Some("") => None,
        Some(rest) => {
            let mut chars = rest.chars();
            match (chars.next().and_then(PieceKind::from_char), chars.next()) {
                (Some(kind), None) => Some(kind),
                _ => return Err(unknown()),
            }
        }
    };

    pos.legal_moves()
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promo == promo)
        .ok_or_else(unknown)
}

/// Plays a whitespace separated list of UCI moves.
pub fn play_uci_moves(pos: &mut Position, moves: &str) -> Result<(), ChessError> {
    for txt in moves.split_whitespace() {
        let mv = parse_uci_move(pos, txt)?;
        pos.apply(mv)?;
    }
    Ok(())
}
