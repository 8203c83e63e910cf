//! Standings table models.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::tournament::TeamId;

/// One row of a standings table. Derived on every call, never stored by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// Team ID
    pub team_id: TeamId,
    /// Finished matches played
    pub played: u32,
    /// Matches won
    pub won: u32,
    /// Matches drawn
    pub drawn: u32,
    /// Matches lost
    pub lost: u32,
    /// Goals scored
    pub goals_for: i64,
    /// Goals conceded
    pub goals_against: i64,
    /// `goals_for - goals_against`
    pub goal_difference: i64,
    /// Table points
    pub points: u32,
    /// Final rank (1-indexed, unique within a table)
    pub rank: usize,
}

impl Standing {
    /// Empty row for a team that has not played yet
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            rank: 0,
        }
    }

    /// Credit one finished match to this row
    pub(crate) fn record(&mut self, scored: i32, conceded: i32) {
        self.played += 1;
        self.goals_for += i64::from(scored);
        self.goals_against += i64::from(conceded);
        self.goal_difference = self.goals_for - self.goals_against;
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => self.won += 1,
            std::cmp::Ordering::Less => self.lost += 1,
            std::cmp::Ordering::Equal => self.drawn += 1,
        }
    }

    /// The (points, goal difference, goals for) triple used by the default tie-break
    pub fn sort_key(&self) -> (u32, i64, i64) {
        (self.points, self.goal_difference, self.goals_for)
    }
}

/// Points awarded per result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsScheme {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointsScheme {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

impl PointsScheme {
    /// Points for a given record, saturating at `u32::MAX`
    pub fn points_for(&self, won: u32, drawn: u32, lost: u32) -> u32 {
        won.saturating_mul(self.win)
            .saturating_add(drawn.saturating_mul(self.draw))
            .saturating_add(lost.saturating_mul(self.loss))
    }
}

/// A single tie-break criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiebreakerRule {
    /// More points ranks higher
    Points,
    /// Larger goal difference ranks higher
    GoalDifference,
    /// More goals scored ranks higher
    GoalsFor,
    /// Fewer goals conceded ranks higher
    GoalsAgainst,
    /// More wins ranks higher
    Wins,
    /// More points in the matches between the tied teams ranks higher
    HeadToHead,
}

impl TiebreakerRule {
    /// Points, then goal difference, then goals scored
    pub fn default_order() -> Vec<TiebreakerRule> {
        vec![
            TiebreakerRule::Points,
            TiebreakerRule::GoalDifference,
            TiebreakerRule::GoalsFor,
        ]
    }
}

impl std::fmt::Display for TiebreakerRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TiebreakerRule::Points => write!(f, "points"),
            TiebreakerRule::GoalDifference => write!(f, "goal_difference"),
            TiebreakerRule::GoalsFor => write!(f, "goals_for"),
            TiebreakerRule::GoalsAgainst => write!(f, "goals_against"),
            TiebreakerRule::Wins => write!(f, "wins"),
            TiebreakerRule::HeadToHead => write!(f, "head_to_head"),
        }
    }
}

/// Error parsing a [`TiebreakerRule`] name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRuleError {
    #[error("Unknown tiebreaker rule: {0}")]
    UnknownRule(String),
}

impl FromStr for TiebreakerRule {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "points" => Ok(TiebreakerRule::Points),
            "goal_difference" => Ok(TiebreakerRule::GoalDifference),
            "goals_for" => Ok(TiebreakerRule::GoalsFor),
            "goals_against" => Ok(TiebreakerRule::GoalsAgainst),
            "wins" => Ok(TiebreakerRule::Wins),
            "head_to_head" => Ok(TiebreakerRule::HeadToHead),
            other => Err(ParseRuleError::UnknownRule(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_counts_and_difference() {
        let mut row = Standing::new(1);
        row.record(3, 1);
        row.record(0, 0);
        row.record(1, 2);

        assert_eq!(row.played, 3);
        assert_eq!((row.won, row.drawn, row.lost), (1, 1, 1));
        assert_eq!(row.goals_for, 4);
        assert_eq!(row.goals_against, 3);
        assert_eq!(row.goal_difference, 1);
    }

    #[test]
    fn test_default_points_scheme() {
        let scheme = PointsScheme::default();
        assert_eq!(scheme.points_for(2, 1, 4), 7);
    }

    #[test]
    fn test_points_saturate_instead_of_overflowing() {
        let scheme = PointsScheme {
            win: u32::MAX,
            draw: 1,
            loss: 0,
        };
        assert_eq!(scheme.points_for(2, 0, 0), u32::MAX);
        assert_eq!(scheme.points_for(1, 5, 3), u32::MAX);
        assert_eq!(scheme.points_for(0, 5, 3), 5);
    }

    #[test]
    fn test_tiebreaker_rule_parsing() {
        assert_eq!("points".parse(), Ok(TiebreakerRule::Points));
        assert_eq!(" Head_To_Head ".parse(), Ok(TiebreakerRule::HeadToHead));
        assert_eq!(
            "coin_toss".parse::<TiebreakerRule>(),
            Err(ParseRuleError::UnknownRule("coin_toss".to_string()))
        );

        for rule in [TiebreakerRule::GoalsAgainst, TiebreakerRule::Wins] {
            assert_eq!(rule.to_string().parse(), Ok(rule));
        }
    }
}
