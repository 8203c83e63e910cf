//! Tie-break comparators for ordering standings rows.

use std::cmp::Ordering;

use super::models::{PointsScheme, Standing, TiebreakerRule};
use crate::tournament::{Match, TeamId};

/// Data available to tie-break comparators.
///
/// Holds only the matches that counted towards the table.
#[derive(Debug, Clone)]
pub struct TiebreakContext<'a> {
    counted: Vec<&'a Match>,
    points: PointsScheme,
}

impl<'a> TiebreakContext<'a> {
    pub fn new(counted: Vec<&'a Match>, points: PointsScheme) -> Self {
        Self { counted, points }
    }

    /// Matches that counted towards the table
    pub fn counted_matches(&self) -> &[&'a Match] {
        &self.counted
    }

    pub fn points_scheme(&self) -> PointsScheme {
        self.points
    }

    /// Points each team earned in matches played against each other
    pub fn head_to_head_points(&self, a: TeamId, b: TeamId) -> (u32, u32) {
        let mut a_row = Standing::new(a);
        let mut b_row = Standing::new(b);

        for m in &self.counted {
            let (Some(home), Some(away)) = (m.home.team_id(), m.away.team_id()) else {
                continue;
            };
            let Some((home_score, away_score)) = m.final_score() else {
                continue;
            };

            if home == a && away == b {
                a_row.record(home_score, away_score);
                b_row.record(away_score, home_score);
            } else if home == b && away == a {
                b_row.record(home_score, away_score);
                a_row.record(away_score, home_score);
            }
        }

        (
            self.points.points_for(a_row.won, a_row.drawn, a_row.lost),
            self.points.points_for(b_row.won, b_row.drawn, b_row.lost),
        )
    }
}

/// A pluggable comparison between two standings rows.
///
/// `Ordering::Less` means `a` ranks above `b`.
pub trait Tiebreaker {
    fn compare(&self, a: &Standing, b: &Standing, ctx: &TiebreakContext<'_>) -> Ordering;
}

impl<F> Tiebreaker for F
where
    F: Fn(&Standing, &Standing, &TiebreakContext<'_>) -> Ordering,
{
    fn compare(&self, a: &Standing, b: &Standing, ctx: &TiebreakContext<'_>) -> Ordering {
        self(a, b, ctx)
    }
}

/// Compares the two tied teams by points earned against each other only
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadToHead;

impl Tiebreaker for HeadToHead {
    fn compare(&self, a: &Standing, b: &Standing, ctx: &TiebreakContext<'_>) -> Ordering {
        let (a_points, b_points) = ctx.head_to_head_points(a.team_id, b.team_id);
        b_points.cmp(&a_points)
    }
}

impl Tiebreaker for TiebreakerRule {
    fn compare(&self, a: &Standing, b: &Standing, ctx: &TiebreakContext<'_>) -> Ordering {
        match self {
            TiebreakerRule::Points => b.points.cmp(&a.points),
            TiebreakerRule::GoalDifference => b.goal_difference.cmp(&a.goal_difference),
            TiebreakerRule::GoalsFor => b.goals_for.cmp(&a.goals_for),
            TiebreakerRule::GoalsAgainst => a.goals_against.cmp(&b.goals_against),
            TiebreakerRule::Wins => b.won.cmp(&a.won),
            TiebreakerRule::HeadToHead => HeadToHead.compare(a, b, ctx),
        }
    }
}
