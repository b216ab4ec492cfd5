//! Error types for the search engine.

/// Errors surfaced by the public search entry points.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// `think` was called on a position without a legal move
    #[error("position has no legal moves")]
    NoLegalMoves,

    /// Fixed-depth searches need at least one ply
    #[error("invalid search depth {0}, expected at least 1")]
    InvalidDepth(i32),
}

/// Errors raised while loading a search configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed
    #[error(transparent)]
    Parse(#[from] toml::de::Error),

    /// The document parsed but describes an unusable engine
    #[error("invalid search config: {0}")]
    Invalid(String),
}

/// Errors raised by the position adapter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// Result type for fallible search operations
pub type SearchResult<T> = Result<T, SearchError>;
