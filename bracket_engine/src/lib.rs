//! # Bracket Engine
//!
//! Competition logic for multi-phase youth tournaments: group tables,
//! round-robin schedules, phase formats, knockout brackets and the
//! placeholders that connect one phase to the next.
//!
//! The engine is pure computation over plain data. The storage layer loads
//! teams, groups, matches and placeholders, calls into the engine, and
//! persists whatever comes back.
//!
//! ## Core Modules
//!
//! - [`standings`]: Ranked tables from finished match results
//! - [`schedule`]: Round-robin and knockout/playoff generation
//! - [`format`]: Phase configuration, validation and match estimates
//! - [`bracket`]: Winner/loser routing between knockout rounds
//! - [`placeholder`]: Substituting concrete teams once sources are decided
//! - [`tournament`]: Shared data model
//! - [`config`]: Environment-driven scoring defaults
//!
//! ## Example
//!
//! ```
//! use bracket_engine::{compute_standings, generate_round_robin};
//! use bracket_engine::tournament::{Team, Match};
//!
//! let teams = vec![Team::new(1, "Lions"), Team::new(2, "Tigers"), Team::new(3, "Bears")];
//! let schedule = generate_round_robin(&teams, 1);
//! assert_eq!(schedule.len(), 3);
//!
//! let played: Vec<Match> = schedule
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, m)| m.into_match(i as i64 + 1).finished(1, 0))
//!     .collect();
//! let table = compute_standings(&teams, &played);
//! assert_eq!(table[0].team_id, 1);
//! ```

/// Winner/loser routing between knockout rounds.
pub mod bracket;
pub use bracket::{Advancement, map_advancement};

/// Environment-driven engine configuration.
pub mod config;
pub use config::{ConfigError, ConfigOverrides, EngineConfig};

/// Phase structure, validation and estimates.
pub mod format;
pub use format::{FormatConfig, FormatValidation, estimate_match_count, validate_format};

/// Placeholder resolution.
pub mod placeholder;
pub use placeholder::{PlaceholderResolver, ResolutionReport, resolve_placeholders};

/// Schedule and bracket generation.
pub mod schedule;
pub use schedule::{generate_knockout, generate_round_robin, generate_round_robin_bulk};

/// Standings computation.
pub mod standings;
pub use standings::{Standing, compute_standings};

/// Shared tournament data model.
pub mod tournament;
