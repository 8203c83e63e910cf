//! Core tournament data model shared by every engine component.
//!
//! This module provides the plain-data types the storage layer hands to
//! the engine and receives back:
//! - Teams, groups and divisions
//! - Matches with tagged home/away [`Participant`] slots
//! - Placeholders and their [`PlaceholderSource`]
//!
//! A slot is either a concrete team or a pending placeholder, never a
//! string that has to be inspected to find out which.

pub mod models;

pub use models::{
    Division, DivisionId, Group, GroupId, Match, MatchId, MatchOutcome, MatchStatus, NewMatch,
    Participant, Placeholder, PlaceholderId, PlaceholderSource, SourceError, Team, TeamId,
};
