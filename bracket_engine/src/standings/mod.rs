//! Standings calculator.
//!
//! Turns a set of match results into a ranked table:
//! - Only finished matches between listed teams count
//! - Win/draw/loss points come from a [`PointsScheme`] (3/1/0 by default)
//! - Ties are broken by an ordered list of [`TiebreakerRule`]s, then by any
//!   caller-supplied [`Tiebreaker`], then by the caller's input order
//!
//! ## Example
//!
//! ```
//! use bracket_engine::standings::compute_standings;
//! use bracket_engine::tournament::{Match, Team};
//!
//! let teams = vec![Team::new(1, "Ajax"), Team::new(2, "Benfica")];
//! let matches = vec![Match::between(10, 1, 2).finished(2, 0)];
//!
//! let table = compute_standings(&teams, &matches);
//! assert_eq!(table[0].team_id, 1);
//! assert_eq!(table[0].points, 3);
//! ```

pub mod calculator;
pub mod models;
pub mod tiebreak;

pub use calculator::{
    StandingsOptions, compute_standings, compute_standings_with, rank_teams, standing_at,
    standings_for_group,
};
pub use models::{ParseRuleError, PointsScheme, Standing, TiebreakerRule};
pub use tiebreak::{HeadToHead, TiebreakContext, Tiebreaker};
