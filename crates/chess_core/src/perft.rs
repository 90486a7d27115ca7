use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Counts leaf positions reachable in exactly `depth` plies.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    count(pos, &mut layers)
}

fn count(pos: &mut Position, layers: &mut [Vec<Move>]) -> u64 {
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };
    legal_moves_into(pos, buf);
    if rest.is_empty() {
        return buf.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in buf.iter().copied() {
        pos.make_move(mv, 0);
        nodes += count(pos, rest);
        pos.undo();
    }
    nodes
}
