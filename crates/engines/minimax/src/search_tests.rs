use super::*;
use crate::eval::MATE_SCORE;
use chess_core::{move_to_uci, Position};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).expect("test FEN must parse")
}

fn engine() -> SearchEngine {
    SearchEngine::seeded(2024, crate::ordering::DEFAULT_JITTER)
}

#[test]
fn stalemate_root_has_no_move_and_scores_zero() {
    let mut p = pos("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
    let result = engine().choose_move(&mut p, 3).unwrap();
    assert_eq!(
        result,
        SearchResult {
            best_move: None,
            score: 0
        }
    );
}

#[test]
fn checkmated_root_has_no_move_and_scores_sentinel() {
    let mut black_mated =
        pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    let result = engine().choose_move(&mut black_mated, 2).unwrap();
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, MATE_SCORE);

    let mut white_mated = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let result = engine().choose_move(&mut white_mated, 2).unwrap();
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -MATE_SCORE);
}

#[test]
fn white_finds_back_rank_mate() {
    let mut p = pos("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
    for depth in 1..=2 {
        let result = engine().choose_move(&mut p, depth).unwrap();
        assert_eq!(result.best_move.map(move_to_uci).as_deref(), Some("e1e8"));
        assert_eq!(result.score, MATE_SCORE);
    }
}

#[test]
fn black_finds_back_rank_mate() {
    let mut p = pos("4q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 0 1");
    let result = engine().choose_move(&mut p, 2).unwrap();
    assert_eq!(result.best_move.map(move_to_uci).as_deref(), Some("e8e1"));
    assert_eq!(result.score, -MATE_SCORE);
}

#[test]
fn shallow_root_score_is_best_child_evaluation() {
    let mut p = pos("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let mut child_scores = Vec::new();
    for mv in p.legal_moves() {
        p.apply(mv).unwrap();
        child_scores.push((mv, evaluate(&mut p)));
        p.undo();
    }
    let best = child_scores.iter().map(|&(_, s)| s).max().unwrap();

    for depth in [0, 1] {
        let result = engine().search_root(&mut p, depth, true).unwrap();
        assert_eq!(result.score, best);
        let chosen = result.best_move.unwrap();
        let (_, chosen_score) = child_scores.iter().find(|(mv, _)| *mv == chosen).unwrap();
        assert_eq!(*chosen_score, result.score);
    }
}

#[test]
fn minimizing_root_takes_lowest_child() {
    let mut p = pos("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 3 3");
    let mut lowest = INFINITY;
    for mv in p.legal_moves() {
        p.apply(mv).unwrap();
        lowest = lowest.min(evaluate(&mut p));
        p.undo();
    }
    let result = engine().search_root(&mut p, 1, false).unwrap();
    assert_eq!(result.score, lowest);
}

#[test]
fn leaf_search_is_static_evaluation() {
    let mut p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let expected = evaluate(&mut p);
    let score = engine().search(&mut p, 0, -INFINITY, INFINITY, true).unwrap();
    assert_eq!(score, expected);
}

#[test]
fn search_counts_nodes_and_restores_position() {
    let mut p = pos("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let before = p.clone();
    let mut e = engine();
    let result = e.choose_move(&mut p, 2).unwrap();
    assert!(result.best_move.is_some());
    assert!(e.nodes() > 48);
    assert_eq!(p, before);
}
