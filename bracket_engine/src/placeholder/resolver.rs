//! Placeholder resolution.
//!
//! A pass runs in two steps. First every placeholder is decided against a
//! snapshot of the current matches and group tables. Then the decided teams
//! are written into the slots and the placeholders are dropped. Because
//! decisions never see substitutions made in the same pass, a winner
//! placeholder whose source match only became concrete now is picked up
//! by a later pass once that match has been played.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::errors::{ResolutionError, ResolutionResult};
use crate::config::EngineConfig;
use crate::standings::{Standing, standing_at, standings_for_group};
use crate::tournament::{
    Division, Group, GroupId, Match, MatchId, Placeholder, PlaceholderId, PlaceholderSource,
    TeamId,
};

/// A placeholder that was replaced by a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub placeholder_id: PlaceholderId,
    pub team_id: TeamId,
    /// Matches that had at least one slot rewritten
    pub matches_updated: usize,
}

/// A placeholder that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub placeholder_id: PlaceholderId,
    pub error: ResolutionError,
}

/// Summary of a resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub resolved_count: usize,
    pub resolved: Vec<Resolution>,
    pub errors: Vec<ResolutionFailure>,
    /// Placeholders left in place (waiting or failed)
    pub unresolved: Vec<PlaceholderId>,
}

impl ResolutionReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Group table and completion state as seen at the start of a pass
struct GroupTable {
    standings: Vec<Standing>,
    outstanding: usize,
    decided: bool,
}

/// Resolves placeholders with a given scoring configuration
#[derive(Debug, Clone, Default)]
pub struct PlaceholderResolver {
    config: EngineConfig,
}

impl PlaceholderResolver {
    /// Create a new resolver
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve every placeholder whose source is decided.
    ///
    /// Resolved placeholders are removed from `placeholders` and their
    /// slots in `matches` are rewritten to the concrete team. Placeholders
    /// whose source match has not finished yet are left alone without an
    /// error. Running the pass again on its own output changes nothing.
    pub fn resolve(
        &self,
        division: &Division,
        placeholders: &mut Vec<Placeholder>,
        matches: &mut [Match],
    ) -> ResolutionReport {
        let tables = self.group_tables(division, matches);
        let by_id: HashMap<MatchId, &Match> = matches.iter().map(|m| (m.id, m)).collect();

        let mut decisions: Vec<(PlaceholderId, TeamId)> = Vec::new();
        let mut report = ResolutionReport::default();

        for placeholder in placeholders.iter() {
            match decide(placeholder, &tables, &by_id) {
                Ok(Some(team_id)) => decisions.push((placeholder.id, team_id)),
                Ok(None) => {
                    log::debug!(
                        "Placeholder {} ({}) is waiting on its source",
                        placeholder.id,
                        placeholder.name
                    );
                }
                Err(error) => {
                    log::warn!(
                        "Failed to resolve placeholder {} ({}): {}",
                        placeholder.id,
                        placeholder.name,
                        error
                    );
                    report.errors.push(ResolutionFailure {
                        placeholder_id: placeholder.id,
                        error,
                    });
                }
            }
        }

        for &(placeholder_id, team_id) in &decisions {
            let matches_updated = matches
                .iter_mut()
                .map(|m| m.replace_placeholder(placeholder_id, team_id))
                .filter(|&replaced| replaced > 0)
                .count();
            report.resolved.push(Resolution {
                placeholder_id,
                team_id,
                matches_updated,
            });
        }

        let resolved_ids: BTreeSet<PlaceholderId> = decisions.iter().map(|(id, _)| *id).collect();
        placeholders.retain(|p| !resolved_ids.contains(&p.id));

        report.resolved_count = report.resolved.len();
        report.unresolved = placeholders.iter().map(|p| p.id).collect();

        log::info!(
            "Resolved {} placeholders for division {} ({} failed, {} remaining)",
            report.resolved_count,
            division.id,
            report.errors.len(),
            report.unresolved.len()
        );
        report
    }

    fn group_tables(&self, division: &Division, matches: &[Match]) -> HashMap<GroupId, GroupTable> {
        let group_rules = division
            .format
            .group_settings()
            .map(|settings| settings.tiebreakers.as_slice());
        let options = self.config.standings_options(group_rules);

        division
            .groups
            .iter()
            .map(|group| {
                let table = GroupTable {
                    standings: standings_for_group(group, matches, &options),
                    outstanding: outstanding_matches(group, matches),
                    decided: is_group_decided(group, matches),
                };
                (group.id, table)
            })
            .collect()
    }
}

/// Resolve placeholders with the default scoring configuration
pub fn resolve_placeholders(
    division: &Division,
    placeholders: &mut Vec<Placeholder>,
    matches: &mut [Match],
) -> ResolutionReport {
    PlaceholderResolver::default().resolve(division, placeholders, matches)
}

/// Placeholder IDs still referenced by a match slot, in ascending order
pub fn pending_placeholders(matches: &[Match]) -> Vec<PlaceholderId> {
    matches
        .iter()
        .flat_map(|m| [m.home.placeholder_id(), m.away.placeholder_id()])
        .flatten()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Whether a group's final table is known.
///
/// Every group match must be finished or cancelled, and a group with at
/// least two teams must have played at least one match.
pub fn is_group_decided(group: &Group, matches: &[Match]) -> bool {
    let group_matches: Vec<&Match> = matches
        .iter()
        .filter(|m| m.group_id == Some(group.id))
        .collect();

    if group_matches.iter().any(|m| !m.is_settled()) {
        return false;
    }

    let distinct: BTreeSet<TeamId> = group.team_ids.iter().copied().collect();
    distinct.len() < 2 || group_matches.iter().any(|m| m.is_finished())
}

fn outstanding_matches(group: &Group, matches: &[Match]) -> usize {
    matches
        .iter()
        .filter(|m| m.group_id == Some(group.id) && !m.is_settled())
        .count()
}

/// Decide a placeholder. `Ok(None)` means the source is not ready yet.
fn decide(
    placeholder: &Placeholder,
    tables: &HashMap<GroupId, GroupTable>,
    matches: &HashMap<MatchId, &Match>,
) -> ResolutionResult<Option<TeamId>> {
    placeholder
        .source
        .validate()
        .map_err(|e| ResolutionError::InvalidSource {
            reason: e.to_string(),
        })?;

    match placeholder.source {
        PlaceholderSource::GroupPosition { group_id, position } => {
            let table = tables
                .get(&group_id)
                .ok_or(ResolutionError::GroupNotFound { group_id })?;

            if position as usize > table.standings.len() {
                return Err(ResolutionError::PositionOutOfRange {
                    group_id,
                    position,
                    team_count: table.standings.len(),
                });
            }
            if !table.decided {
                return Err(ResolutionError::GroupUndecided {
                    group_id,
                    outstanding: table.outstanding,
                });
            }

            Ok(standing_at(&table.standings, position as usize).map(|s| s.team_id))
        }
        PlaceholderSource::MatchWinner { match_id } | PlaceholderSource::MatchLoser { match_id } => {
            let source = matches
                .get(&match_id)
                .ok_or(ResolutionError::SourceMatchNotFound { match_id })?;

            if !source.is_finished() {
                return Ok(None);
            }
            if source.final_score().is_none() {
                return Err(ResolutionError::MissingScore { match_id });
            }

            let slot = match placeholder.source {
                PlaceholderSource::MatchWinner { .. } => source.winning_slot(),
                _ => source.losing_slot(),
            }
            .ok_or(ResolutionError::DrawnMatch { match_id })?;

            slot.team_id()
                .map(Some)
                .ok_or(ResolutionError::SourceNotConcrete { match_id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::{MatchStatus, Participant};

    fn division() -> Division {
        Division::new(1, "U12", vec![Group::new(10, "Group A", vec![1, 2, 3])])
    }

    fn group_matches() -> Vec<Match> {
        vec![
            Match::between(1, 1, 2).in_group(10).finished(2, 0),
            Match::between(2, 1, 3).in_group(10).finished(1, 0),
            Match::between(3, 2, 3).in_group(10).finished(0, 0),
        ]
    }

    fn winner_of_group() -> Placeholder {
        Placeholder::new(
            100,
            "Winner of Group A",
            PlaceholderSource::GroupPosition {
                group_id: 10,
                position: 1,
            },
        )
    }

    #[test]
    fn test_group_position_resolves_and_rewrites_slots() {
        let mut matches = group_matches();
        matches.push(Match::new(50, Participant::Pending(100), Participant::Team(9)).in_round(1));
        let mut placeholders = vec![winner_of_group()];

        let report = resolve_placeholders(&division(), &mut placeholders, &mut matches);

        assert_eq!(report.resolved_count, 1);
        assert_eq!(
            report.resolved[0],
            Resolution {
                placeholder_id: 100,
                team_id: 1,
                matches_updated: 1,
            }
        );
        assert!(placeholders.is_empty());
        assert_eq!(matches[3].home, Participant::Team(1));
        assert!(pending_placeholders(&matches).is_empty());
    }

    #[test]
    fn test_undecided_group_reports_error() {
        let mut matches = group_matches();
        matches[2].status = MatchStatus::Scheduled;
        let mut placeholders = vec![winner_of_group()];

        let report = resolve_placeholders(&division(), &mut placeholders, &mut matches);

        assert_eq!(report.resolved_count, 0);
        assert_eq!(
            report.errors[0].error,
            ResolutionError::GroupUndecided {
                group_id: 10,
                outstanding: 1
            }
        );
        assert_eq!(report.unresolved, vec![100]);
    }

    #[test]
    fn test_group_without_matches_is_undecided() {
        let mut matches = Vec::new();
        let mut placeholders = vec![winner_of_group()];
        let report = resolve_placeholders(&division(), &mut placeholders, &mut matches);
        assert!(matches!(
            report.errors[0].error,
            ResolutionError::GroupUndecided { .. }
        ));
    }

    #[test]
    fn test_position_out_of_range_and_unknown_group() {
        let mut matches = group_matches();
        let mut placeholders = vec![
            Placeholder::new(
                1,
                "4th of Group A",
                PlaceholderSource::GroupPosition {
                    group_id: 10,
                    position: 4,
                },
            ),
            Placeholder::new(
                2,
                "Winner of Group Z",
                PlaceholderSource::GroupPosition {
                    group_id: 99,
                    position: 1,
                },
            ),
            Placeholder::new(
                3,
                "Bad",
                PlaceholderSource::GroupPosition {
                    group_id: 10,
                    position: 0,
                },
            ),
        ];

        let report = resolve_placeholders(&division(), &mut placeholders, &mut matches);
        let errors: Vec<&ResolutionError> = report.errors.iter().map(|f| &f.error).collect();

        assert!(matches!(
            errors[0],
            ResolutionError::PositionOutOfRange { position: 4, .. }
        ));
        assert_eq!(errors[1], &ResolutionError::GroupNotFound { group_id: 99 });
        assert!(matches!(errors[2], ResolutionError::InvalidSource { .. }));
        assert_eq!(placeholders.len(), 3);
    }

    #[test]
    fn test_match_sources() {
        let mut matches = vec![
            Match::between(1, 1, 2).in_round(1).finished(3, 1),
            Match::between(2, 3, 4).in_round(1).finished(2, 2),
            Match::between(3, 5, 6).in_round(1),
            Match::new(4, Participant::Pending(10), Participant::Pending(11)).in_round(2),
            Match::new(5, Participant::Pending(12), Participant::Pending(13)).in_round(2),
        ];
        let mut placeholders = vec![
            Placeholder::new(10, "W1", PlaceholderSource::MatchWinner { match_id: 1 }),
            Placeholder::new(11, "W2", PlaceholderSource::MatchWinner { match_id: 2 }),
            Placeholder::new(12, "L1", PlaceholderSource::MatchLoser { match_id: 1 }),
            Placeholder::new(13, "W3", PlaceholderSource::MatchWinner { match_id: 3 }),
            Placeholder::new(14, "W99", PlaceholderSource::MatchWinner { match_id: 99 }),
        ];

        let report = resolve_placeholders(&division(), &mut placeholders, &mut matches);

        assert_eq!(report.resolved_count, 2);
        assert_eq!(matches[3].home, Participant::Team(1));
        assert_eq!(matches[4].home, Participant::Team(2));

        // Draw and missing source are errors, unplayed source is silent
        assert_eq!(report.errors.len(), 2);
        assert_eq!(
            report.errors[0].error,
            ResolutionError::DrawnMatch { match_id: 2 }
        );
        assert_eq!(
            report.errors[1].error,
            ResolutionError::SourceMatchNotFound { match_id: 99 }
        );
        assert_eq!(report.unresolved, vec![11, 13, 14]);
    }

    #[test]
    fn test_source_with_pending_slot_is_not_concrete() {
        let mut matches = vec![Match::new(1, Participant::Pending(7), Participant::Team(2)).finished(1, 0)];
        let mut placeholders = vec![Placeholder::new(
            8,
            "W1",
            PlaceholderSource::MatchWinner { match_id: 1 },
        )];
        let report = resolve_placeholders(&division(), &mut placeholders, &mut matches);
        assert_eq!(
            report.errors[0].error,
            ResolutionError::SourceNotConcrete { match_id: 1 }
        );
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let mut matches = group_matches();
        matches.push(Match::new(50, Participant::Pending(100), Participant::Team(9)));
        let mut placeholders = vec![winner_of_group()];

        resolve_placeholders(&division(), &mut placeholders, &mut matches);
        let (matches_after, placeholders_after) = (matches.clone(), placeholders.clone());

        let report = resolve_placeholders(&division(), &mut placeholders, &mut matches);
        assert_eq!(report.resolved_count, 0);
        assert_eq!(matches, matches_after);
        assert_eq!(placeholders, placeholders_after);
    }

    #[test]
    fn test_cancelled_matches_do_not_block_group() {
        let mut matches = group_matches();
        matches[2].status = MatchStatus::Cancelled;
        assert!(is_group_decided(&division().groups[0], &matches));
    }
}
