//! Single round-robin schedule generation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::tournament::{Group, GroupId, Match, MatchStatus, NewMatch, Participant, Team, TeamId};

/// Index pairs `(i, j)` with `i < j` in enumeration order
pub fn round_robin_pairs(team_count: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..team_count).flat_map(move |i| ((i + 1)..team_count).map(move |j| (i, j)))
}

/// Generate one match per pair of distinct teams.
///
/// Pairs are enumerated in input order, so the same input always yields
/// the same schedule. Fewer than two teams yields no matches.
pub fn generate_round_robin(teams: &[Team], group_id: GroupId) -> Vec<NewMatch> {
    let team_ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    generate_for_team_ids(&team_ids, group_id)
}

/// Same as [`generate_round_robin`] but from bare team IDs
pub fn generate_for_team_ids(team_ids: &[TeamId], group_id: GroupId) -> Vec<NewMatch> {
    let mut seen = HashSet::with_capacity(team_ids.len());
    let distinct: Vec<TeamId> = team_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    round_robin_pairs(distinct.len())
        .map(|(i, j)| NewMatch {
            home: Participant::Team(distinct[i]),
            away: Participant::Team(distinct[j]),
            status: MatchStatus::Scheduled,
            group_id: Some(group_id),
            round: 1,
            round_label: None,
            match_label: None,
            start_time: None,
        })
        .collect()
}

/// What happened to one group during bulk generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Matches were generated
    Generated { matches: Vec<NewMatch> },
    /// The group has fewer than two teams
    SkippedInsufficientTeams { team_count: usize },
    /// The group already has matches
    SkippedAlreadyExists { existing: usize },
}

impl GenerationOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, GenerationOutcome::Generated { .. })
    }
}

/// Per-group result of bulk generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupGeneration {
    pub group_id: GroupId,
    pub outcome: GenerationOutcome,
}

/// Generate round-robin schedules for many groups at once.
///
/// Groups that already have matches or lack teams are skipped and reported;
/// a skipped group never prevents its siblings from being generated.
pub fn generate_round_robin_bulk(groups: &[Group], existing: &[Match]) -> Vec<GroupGeneration> {
    groups
        .iter()
        .map(|group| {
            let existing_count = existing
                .iter()
                .filter(|m| m.group_id == Some(group.id))
                .count();
            let distinct: HashSet<&TeamId> = group.team_ids.iter().collect();

            let outcome = if existing_count > 0 {
                GenerationOutcome::SkippedAlreadyExists {
                    existing: existing_count,
                }
            } else if distinct.len() < 2 {
                GenerationOutcome::SkippedInsufficientTeams {
                    team_count: distinct.len(),
                }
            } else {
                GenerationOutcome::Generated {
                    matches: generate_for_team_ids(&group.team_ids, group.id),
                }
            };

            match &outcome {
                GenerationOutcome::Generated { matches } => log::info!(
                    "Generated {} round-robin matches for group {}",
                    matches.len(),
                    group.id
                ),
                skipped => log::debug!("Skipped group {}: {:?}", group.id, skipped),
            }

            GroupGeneration {
                group_id: group.id,
                outcome,
            }
        })
        .collect()
}
