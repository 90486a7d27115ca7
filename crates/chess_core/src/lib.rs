//! Chess rules for the minimax engine: a mailbox board with an undo stack,
//! legal move generation, and the mate/draw predicates a search needs.

pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use board::*;
pub use error::ChessError;
pub use movegen::legal_moves_into;
pub use perft::perft;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;
