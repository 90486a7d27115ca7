use super::*;
use chess_core::{parse_uci_move, Position};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn victim_value(pos: &Position, mv: Move) -> Score {
    pos.piece_at(mv.to).map_or(0, |pc| piece_value(pc.kind))
}

#[test]
fn captures_come_out_in_victim_order() {
    let mut pos = Position::from_fen(KIWIPETE).unwrap();
    let moves = pos.legal_moves();
    let mut orderer = MoveOrderer::seeded(7, 0);

    let ordered = orderer.order(&pos, moves);
    let values: Vec<Score> = ordered.iter().map(|&mv| victim_value(&pos, mv)).collect();

    assert!(values[0] > 0, "a capture should lead");
    assert!(
        values.windows(2).all(|w| w[0] >= w[1]),
        "victim values not non-increasing: {values:?}"
    );
}

#[test]
fn ordering_is_a_permutation() {
    let mut pos = Position::from_fen(KIWIPETE).unwrap();
    let moves = pos.legal_moves();
    let mut orderer = MoveOrderer::seeded(99, DEFAULT_JITTER);

    let mut ordered = orderer.order(&pos, moves.clone());
    assert_eq!(ordered.len(), moves.len());
    let key = |m: &Move| (m.from, m.to, m.promo.map(|k| k.idx()));
    let mut original = moves;
    original.sort_by_key(key);
    ordered.sort_by_key(key);
    assert_eq!(ordered, original);
}

#[test]
fn promotion_outranks_queen_capture() {
    // a7a8 promotes; the rook on b1 can take the queen on b5
    let mut pos = Position::from_fen("7k/P7/8/1q6/8/8/8/KR6 w - - 0 1").unwrap();
    let take_queen = parse_uci_move(&mut pos, "b1b5").unwrap();
    let moves = pos.legal_moves();
    let mut orderer = MoveOrderer::seeded(1, DEFAULT_JITTER);

    let ordered = orderer.order(&pos, moves);
    assert!(ordered[..4].iter().all(|m| m.promo.is_some()));
    assert_eq!(ordered[4], take_queen);
}

#[test]
fn same_seed_same_order() {
    let mut pos = Position::startpos();
    let moves = pos.legal_moves();

    let a = MoveOrderer::seeded(42, DEFAULT_JITTER).order(&pos, moves.clone());
    let b = MoveOrderer::seeded(42, DEFAULT_JITTER).order(&pos, moves);
    assert_eq!(a, b);
}

#[test]
fn zero_jitter_keeps_quiet_moves_in_generation_order() {
    let mut pos = Position::startpos();
    let moves = pos.legal_moves();
    let ordered = MoveOrderer::seeded(3, 0).order(&pos, moves.clone());
    assert_eq!(ordered, moves);
}

#[test]
fn en_passant_gets_no_capture_bonus() {
    let mut pos =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let ep = parse_uci_move(&mut pos, "e5f6").unwrap();
    assert_eq!(MoveOrderer::<StdRng>::static_score(&pos, ep), 0);
}

#[test]
fn full_range_jitter_still_orders_every_move() {
    let mut pos = Position::from_fen("7k/P7/8/1q6/8/8/8/KR6 w - - 0 1").unwrap();
    let moves = pos.legal_moves();
    for jitter in [i32::MAX as u32, u32::MAX] {
        let mut orderer = MoveOrderer::seeded(5, jitter);
        let ordered = orderer.order(&pos, moves.clone());
        assert_eq!(ordered.len(), moves.len());
        assert!(moves.iter().all(|mv| ordered.contains(mv)));
    }
}
