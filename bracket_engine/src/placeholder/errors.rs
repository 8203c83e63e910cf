//! Placeholder resolution error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tournament::{GroupId, MatchId};

/// Why a placeholder could not be resolved.
///
/// None of these abort a resolution pass; they are collected per
/// placeholder in the report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ResolutionError {
    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: GroupId },

    #[error("Position {position} is out of range for group {group_id} ({team_count} teams)")]
    PositionOutOfRange {
        group_id: GroupId,
        position: u32,
        team_count: usize,
    },

    #[error("Group {group_id} is not decided yet ({outstanding} matches outstanding)")]
    GroupUndecided { group_id: GroupId, outstanding: usize },

    #[error("Source match not found: {match_id}")]
    SourceMatchNotFound { match_id: MatchId },

    #[error("Match {match_id} ended in a draw; winner and loser are undefined")]
    DrawnMatch { match_id: MatchId },

    #[error("Match {match_id} is finished but has no recorded score")]
    MissingScore { match_id: MatchId },

    #[error("Match {match_id} was decided but the relevant slot is not a concrete team")]
    SourceNotConcrete { match_id: MatchId },

    #[error("Invalid placeholder source: {reason}")]
    InvalidSource { reason: String },
}

/// Result type for resolving a single placeholder
pub type ResolutionResult<T> = Result<T, ResolutionError>;
