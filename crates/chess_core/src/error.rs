use thiserror::Error;

/// Errors raised by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    /// The move does not fit the position (empty or foreign from-square,
    /// own piece on the target square).
    #[error("illegal move {mv} in this position")]
    IllegalMove { mv: String },

    #[error("`{text}` is not a legal move in this position")]
    UnknownMove { text: String },
}

impl ChessError {
    pub(crate) fn fen(fen: &str, reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: reason.into(),
        }
    }
}
