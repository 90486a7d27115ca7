//! Depth-limited minimax with alpha-beta pruning.
//!
//! Scores are White-relative, so White maximises and Black minimises. Every
//! move is played through a [`Ply`] guard; the caller's position is the same
//! after a search as before it, on success and on error alike.

use chess_core::{Color, Move};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::error::SearchError;
use crate::eval::{evaluate, Score};
use crate::ordering::MoveOrderer;
use crate::rules::{Ply, Rules};

/// Bound used for an open alpha-beta window. Wider than any evaluation.
pub const INFINITY: Score = Score::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the root position has no legal move
    pub best_move: Option<Move>,
    pub score: Score,
}

/// Alpha-beta searcher. Owns the move orderer and its random source.
#[derive(Debug, Clone)]
pub struct SearchEngine<G: Rng = StdRng> {
    orderer: MoveOrderer<G>,
    nodes: u64,
}

impl<G: Rng> SearchEngine<G> {
    pub fn new(orderer: MoveOrderer<G>) -> Self {
        Self { orderer, nodes: 0 }
    }

    /// Interior nodes visited by the last root search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches for the side to move: White maximises, Black minimises.
    pub fn choose_move<R: Rules + ?Sized>(
        &mut self,
        rules: &mut R,
        depth: u8,
    ) -> Result<SearchResult, SearchError> {
        let maximize = rules.side_to_move() == Color::White;
        self.search_root(rules, depth, maximize)
    }

    /// Picks the best root move for the given direction.
    ///
    /// Each root move gets its own full `(-INFINITY, INFINITY)` window; ties
    /// keep the earliest move in search order. A position without legal
    /// moves yields no move and its static score (0 for stalemate, the mate
    /// sentinel for checkmate). `depth` 0 is searched as 1.
    pub fn search_root<R: Rules + ?Sized>(
        &mut self,
        rules: &mut R,
        depth: u8,
        maximize: bool,
    ) -> Result<SearchResult, SearchError> {
        self.nodes = 0;

        let moves = rules.legal_moves();
        if moves.is_empty() {
            let score = evaluate(rules);
            debug!("no legal moves at root, score {score}");
            return Ok(SearchResult {
                best_move: None,
                score,
            });
        }
        let moves = self.orderer.order(&*rules, moves);

        let mut best: Option<(Move, Score)> = None;
        for mv in moves {
            let score = {
                let mut child = enter(rules, mv)?;
                self.search(
                    &mut *child,
                    depth.saturating_sub(1),
                    -INFINITY,
                    INFINITY,
                    !maximize,
                )?
            };
            trace!("root {mv}: {score}");

            let improves = match best {
                None => true,
                Some((_, b)) if maximize => score > b,
                Some((_, b)) => score < b,
            };
            if improves {
                best = Some((mv, score));
            }
        }

        let (mv, score) = best.map_or((None, 0), |(mv, s)| (Some(mv), s));
        debug!(
            "depth {depth} {}: best {} score {score} nodes {}",
            if maximize { "max" } else { "min" },
            mv.map_or_else(|| "none".to_string(), |m| m.to_string()),
            self.nodes
        );
        Ok(SearchResult {
            best_move: mv,
            score,
        })
    }

    /// Minimax value of the position, pruned to the `(alpha, beta)` window.
    ///
    /// Leaves (depth 0 or game over) are scored with [`evaluate`].
    pub fn search<R: Rules + ?Sized>(
        &mut self,
        rules: &mut R,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        maximize: bool,
    ) -> Result<Score, SearchError> {
        self.nodes += 1;
        if depth == 0 || rules.is_game_over() {
            return Ok(evaluate(rules));
        }

        let moves = rules.legal_moves();
        let moves = self.orderer.order(&*rules, moves);

        let mut best = if maximize { -INFINITY } else { INFINITY };
        for mv in moves {
            let score = {
                let mut child = enter(rules, mv)?;
                self.search(&mut *child, depth - 1, alpha, beta, !maximize)?
            };

            if maximize {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                trace!("cutoff after {mv} at depth {depth}");
                break;
            }
        }
        Ok(best)
    }
}

impl SearchEngine<StdRng> {
    pub fn seeded(seed: u64, jitter: u32) -> Self {
        Self::new(MoveOrderer::seeded(seed, jitter))
    }

    pub fn from_entropy(jitter: u32) -> Self {
        Self::new(MoveOrderer::from_entropy(jitter))
    }
}

/// Plays `mv` behind a guard; a refusal is a broken rules contract.
fn enter<R: Rules + ?Sized>(rules: &mut R, mv: Move) -> Result<Ply<'_, R>, SearchError> {
    Ply::apply(rules, mv).map_err(|e| {
        warn!("rules engine rejected {mv}: {e}");
        SearchError::MoveRejected {
            mv,
            source: Box::new(e),
        }
    })
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
