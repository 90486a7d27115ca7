use std::path::PathBuf;

use chess_core::Move;
use thiserror::Error;

/// A search could not finish.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The rules engine refused a move it had just listed as legal.
    #[error("rules engine rejected its own legal move {mv}")]
    MoveRejected {
        mv: Move,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read search config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid search config")]
    Parse(#[from] toml::de::Error),
}
