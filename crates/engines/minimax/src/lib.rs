//! Minimax Chess Engine
//!
//! Picks a move for the side to move with a fixed-depth minimax search and
//! alpha-beta pruning over a material, piece-square and mobility evaluation.
//!
//! The board itself is owned by a rules engine reached through the [`Rules`]
//! trait; `chess_core::Position` implements it.

mod config;
mod error;
mod eval;
mod ordering;
mod rules;
mod search;

use chess_core::Position;
use tracing::info;

pub use config::SearchConfig;
pub use error::{ConfigError, SearchError};
pub use eval::{
    evaluate, material_and_squares, mobility, piece_value, square_bonus, Score, SquareTable,
    GENERIC_TABLE, MATE_SCORE, MOBILITY_WEIGHT, PAWN_TABLE, PIECE_VALUES,
};
pub use ordering::{MoveOrderer, CAPTURE_WEIGHT, DEFAULT_JITTER, PROMOTION_BONUS};
pub use rules::{Ply, Rules};
pub use search::{SearchEngine, SearchResult, INFINITY};

/// Configured searcher for `chess_core` positions.
///
/// Uses:
/// - Minimax with alpha-beta pruning, fresh window per root move
/// - Capture/promotion move ordering with seeded or random jitter
/// - Material + pawn table + mobility evaluation, mate and draw aware
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    config: SearchConfig,
    search: SearchEngine,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        let search = match config.seed {
            Some(seed) => SearchEngine::seeded(seed, config.jitter),
            None => SearchEngine::from_entropy(config.jitter),
        };
        Self { config, search }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for the side to move at the configured depth.
    ///
    /// A finished game (mate, stalemate, dead position, seventy-five-move
    /// rule, fivefold repetition) is not searched: no move, static score.
    pub fn choose_move(&mut self, pos: &mut Position) -> Result<SearchResult, SearchError> {
        if pos.is_game_over() {
            let score = evaluate(pos);
            info!("{}: game over, score {score}", self.name());
            return Ok(SearchResult {
                best_move: None,
                score,
            });
        }
        let result = self.search.choose_move(pos, self.config.depth)?;
        info!(
            "{}: {:?} score {} ({} nodes)",
            self.name(),
            result.best_move.map(|m| m.to_string()),
            result.score,
            self.search.nodes()
        );
        Ok(result)
    }

    pub fn evaluate(&self, pos: &mut Position) -> Score {
        evaluate(pos)
    }

    /// Nodes visited by the last `choose_move`.
    pub fn nodes(&self) -> u64 {
        self.search.nodes()
    }

    /// Reseeds the ordering jitter so a seeded engine replays identically.
    pub fn new_game(&mut self) {
        *self = Self::new(self.config.clone());
    }

    pub fn name(&self) -> &str {
        "Minimax v1.0"
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
