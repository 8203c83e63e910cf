//! Placeholder resolution engine.
//!
//! Placeholders stand in for teams that are not known yet: the winner of
//! a group, the loser of a semifinal. Once the source is decided the
//! resolver writes the concrete team into every slot that referenced the
//! placeholder and drops it.
//!
//! ## Example
//!
//! ```
//! use bracket_engine::placeholder::resolve_placeholders;
//! use bracket_engine::tournament::{
//!     Division, Match, Participant, Placeholder, PlaceholderSource,
//! };
//!
//! let division = Division::new(1, "Open", vec![]);
//! let mut placeholders = vec![Placeholder::new(
//!     7,
//!     "Winner of Match 1",
//!     PlaceholderSource::MatchWinner { match_id: 1 },
//! )];
//! let mut matches = vec![
//!     Match::between(1, 10, 20).finished(0, 2),
//!     Match::new(2, Participant::Pending(7), Participant::Team(30)).in_round(2),
//! ];
//!
//! let report = resolve_placeholders(&division, &mut placeholders, &mut matches);
//! assert_eq!(report.resolved_count, 1);
//! assert_eq!(matches[1].home, Participant::Team(20));
//! assert!(placeholders.is_empty());
//! ```

pub mod errors;
pub mod resolver;

pub use errors::{ResolutionError, ResolutionResult};
pub use resolver::{
    PlaceholderResolver, Resolution, ResolutionFailure, ResolutionReport, is_group_decided,
    pending_placeholders, resolve_placeholders,
};
