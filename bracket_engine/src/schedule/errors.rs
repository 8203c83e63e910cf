//! Bracket generation error types.

use thiserror::Error;

use crate::format::BracketType;

/// Bracket generation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Entrant count is not a power of two of at least 2
    #[error("Knockout needs a power-of-two number of entrants (at least 2), got {0}")]
    InvalidEntrantCount(usize),

    /// Playoff bracket size is not a power of two of at least 2
    #[error("Playoff bracket size must be a power of two of at least 2, got {0}")]
    InvalidBracketSize(u32),

    /// Playoff entrants do not fill the declared bracket
    #[error("Playoff bracket size is {expected} but {actual} entrants were given")]
    EntrantCountMismatch { expected: usize, actual: usize },

    /// Bracket type the generator cannot lay out
    #[error("Unsupported bracket type: {0:?}")]
    UnsupportedBracketType(BracketType),

    /// The allocator ran past the largest representable ID
    #[error("No {kind} IDs left after {last}")]
    IdsExhausted { kind: &'static str, last: i64 },

    /// Fifth-place match enabled without its two entrants
    #[error("Fifth-place match is enabled but no entrants were given for it")]
    MissingFifthPlaceEntrants,
}

/// Result type for bracket generation
pub type BracketResult<T> = Result<T, BracketError>;
