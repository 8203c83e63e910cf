//! Standings computation from match results.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::models::{PointsScheme, Standing, TiebreakerRule};
use super::tiebreak::{TiebreakContext, Tiebreaker};
use crate::tournament::{Group, Match, Team, TeamId};

/// Options for a standings computation
pub struct StandingsOptions {
    /// Points per result
    pub points: PointsScheme,
    /// Ordered criteria applied first
    pub rules: Vec<TiebreakerRule>,
    /// Caller-supplied comparators applied after `rules`
    pub tiebreakers: Vec<Box<dyn Tiebreaker>>,
}

impl Default for StandingsOptions {
    fn default() -> Self {
        Self {
            points: PointsScheme::default(),
            rules: TiebreakerRule::default_order(),
            tiebreakers: Vec::new(),
        }
    }
}

impl std::fmt::Debug for StandingsOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandingsOptions")
            .field("points", &self.points)
            .field("rules", &self.rules)
            .field("tiebreakers", &self.tiebreakers.len())
            .finish()
    }
}

impl StandingsOptions {
    /// Options with the given rule order and default points
    pub fn with_rules(rules: Vec<TiebreakerRule>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Append a caller-supplied comparator
    pub fn with_tiebreaker(mut self, tiebreaker: impl Tiebreaker + 'static) -> Self {
        self.tiebreakers.push(Box::new(tiebreaker));
        self
    }
}

/// Compute standings with the default points scheme and tie-breaks.
///
/// Only finished matches between two teams of `teams` count. Rows are
/// ordered by points, goal difference and goals scored; teams still tied
/// keep the order in which they appear in `teams`.
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Vec<Standing> {
    compute_standings_with(teams, matches, &StandingsOptions::default())
}

/// Compute standings with explicit options
pub fn compute_standings_with(
    teams: &[Team],
    matches: &[Match],
    options: &StandingsOptions,
) -> Vec<Standing> {
    let team_ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    rank_teams(&team_ids, matches, options)
}

/// Compute the standings of one group from its member list.
///
/// Matches belonging to other groups are ignored.
pub fn standings_for_group(
    group: &Group,
    matches: &[Match],
    options: &StandingsOptions,
) -> Vec<Standing> {
    let group_matches: Vec<Match> = matches
        .iter()
        .filter(|m| m.group_id == Some(group.id))
        .cloned()
        .collect();
    rank_teams(&group.team_ids, &group_matches, options)
}

/// Row at a 1-indexed rank
pub fn standing_at(standings: &[Standing], position: usize) -> Option<&Standing> {
    standings.iter().find(|s| s.rank == position)
}

/// Rank a list of teams. Duplicate IDs are counted once, at their first position.
pub fn rank_teams(team_ids: &[TeamId], matches: &[Match], options: &StandingsOptions) -> Vec<Standing> {
    let mut index: HashMap<TeamId, usize> = HashMap::with_capacity(team_ids.len());
    let mut rows: Vec<Standing> = Vec::with_capacity(team_ids.len());

    for &team_id in team_ids {
        if !index.contains_key(&team_id) {
            index.insert(team_id, rows.len());
            rows.push(Standing::new(team_id));
        }
    }

    let counted: Vec<&Match> = matches
        .iter()
        .filter(|m| counts_towards_table(m, &index))
        .collect();

    for m in &counted {
        let (Some(home), Some(away)) = (m.home.team_id(), m.away.team_id()) else {
            continue;
        };
        let Some((home_score, away_score)) = m.final_score() else {
            continue;
        };
        rows[index[&home]].record(home_score, away_score);
        rows[index[&away]].record(away_score, home_score);
    }

    for row in &mut rows {
        row.points = options.points.points_for(row.won, row.drawn, row.lost);
    }

    log::debug!(
        "Ranking {} teams from {} counted matches ({} supplied)",
        rows.len(),
        counted.len(),
        matches.len()
    );

    let ctx = TiebreakContext::new(counted, options.points);

    // Pair each row with its input position so the final fallback is explicit
    let mut ordered: Vec<(usize, Standing)> = rows.into_iter().enumerate().collect();
    insertion_sort_by(&mut ordered, |(a_pos, a), (b_pos, b)| {
        options
            .rules
            .iter()
            .map(|rule| rule.compare(a, b, &ctx))
            .chain(options.tiebreakers.iter().map(|t| t.compare(a, b, &ctx)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| a_pos.cmp(b_pos))
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, (_, mut row))| {
            row.rank = i + 1;
            row
        })
        .collect()
}

/// Stable sort that tolerates comparators without a total order.
///
/// Head-to-head comparisons can be cyclic (A beat B, B beat C, C beat A),
/// which the standard library sorts are allowed to panic on.
fn insertion_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn counts_towards_table(m: &Match, index: &HashMap<TeamId, usize>) -> bool {
    let (Some(home), Some(away)) = (m.home.team_id(), m.away.team_id()) else {
        return false;
    };
    m.final_score().is_some()
        && home != away
        && index.contains_key(&home)
        && index.contains_key(&away)
}
