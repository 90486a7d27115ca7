//! Move ordering for alpha-beta: promotions first, then captures by victim
//! value, with a little random jitter to break ties.

use std::cmp::Reverse;

use chess_core::Move;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::eval::{piece_value, Score};
use crate::rules::Rules;

/// Multiplier on the captured piece's value.
pub const CAPTURE_WEIGHT: Score = 1_000;

/// Bonus for any promotion; larger than the best capture (1000 × queen).
pub const PROMOTION_BONUS: Score = 10_000_000;

/// Default inclusive upper bound of the tie-breaking jitter.
pub const DEFAULT_JITTER: u32 = 10;

/// Sorts moves so the likely-best ones are searched first.
///
/// The random source is owned by the orderer, so a seeded orderer always
/// produces the same sequence of orderings.
#[derive(Debug, Clone)]
pub struct MoveOrderer<G: Rng = StdRng> {
    rng: G,
    jitter: u32,
}

impl MoveOrderer<StdRng> {
    pub fn seeded(seed: u64, jitter: u32) -> Self {
        Self::new(StdRng::seed_from_u64(seed), jitter)
    }

    pub fn from_entropy(jitter: u32) -> Self {
        Self::new(StdRng::from_entropy(), jitter)
    }
}

impl<G: Rng> MoveOrderer<G> {
    pub fn new(rng: G, jitter: u32) -> Self {
        Self { rng, jitter }
    }

    pub fn jitter(&self) -> u32 {
        self.jitter
    }

    /// Deterministic part of a move's ordering score.
    pub fn static_score<R: Rules + ?Sized>(rules: &R, mv: Move) -> Score {
        let mut score = 0;
        if rules.is_capture(mv) {
            // en-passant lands on an empty square and earns nothing here
            if let Some(victim) = rules.piece_at(mv.to) {
                score += CAPTURE_WEIGHT * piece_value(victim.kind);
            }
        }
        if mv.promo.is_some() {
            score += PROMOTION_BONUS;
        }
        score
    }

    /// Returns `moves` best-first. The result is a permutation of the input.
    ///
    /// Sort keys are widened to `i64`, so any `u32` jitter fits on top of the
    /// largest static score.
    pub fn order<R: Rules + ?Sized>(&mut self, rules: &R, moves: Vec<Move>) -> Vec<Move> {
        let mut scored: Vec<(i64, Move)> = moves
            .into_iter()
            .map(|mv| {
                let jitter = i64::from(self.rng.gen_range(0..=self.jitter));
                (i64::from(Self::static_score(rules, mv)) + jitter, mv)
            })
            .collect();
        scored.sort_by_key(|&(score, _)| Reverse(score));
        scored.into_iter().map(|(_, mv)| mv).collect()
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
