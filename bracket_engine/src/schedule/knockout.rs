//! Knockout and playoff bracket generation.
//!
//! Only the first round is filled with the supplied entrants. Every later
//! slot holds a match-winner placeholder, and third-place matches hold
//! match-loser placeholders, so the bracket can be stored before anyone
//! has advanced.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::errors::{BracketError, BracketResult};
use crate::format::{BracketType, KnockoutSettings, PhaseRules, PlayoffSettings, SeedingMethod};
use crate::tournament::{
    Group, Match, MatchId, Participant, Placeholder, PlaceholderId, PlaceholderSource,
};

/// Hands out fresh IDs for generated matches and placeholders.
///
/// Start it above the highest stored IDs so nothing collides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next_match_id: MatchId,
    next_placeholder_id: PlaceholderId,
}

impl IdAllocator {
    pub fn new(first_match_id: MatchId, first_placeholder_id: PlaceholderId) -> Self {
        Self {
            next_match_id: first_match_id,
            next_placeholder_id: first_placeholder_id,
        }
    }

    pub fn next_match_id(&mut self) -> BracketResult<MatchId> {
        take_id(&mut self.next_match_id, "match")
    }

    pub fn next_placeholder_id(&mut self) -> BracketResult<PlaceholderId> {
        take_id(&mut self.next_placeholder_id, "placeholder")
    }
}

fn take_id(next: &mut i64, kind: &'static str) -> BracketResult<i64> {
    let id = *next;
    *next = id
        .checked_add(1)
        .ok_or(BracketError::IdsExhausted { kind, last: id })?;
    Ok(id)
}

/// Matches and placeholders of a generated bracket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutPlan {
    pub matches: Vec<Match>,
    pub placeholders: Vec<Placeholder>,
}

impl KnockoutPlan {
    fn placeholder(
        &mut self,
        ids: &mut IdAllocator,
        name: String,
        source: PlaceholderSource,
    ) -> BracketResult<Participant> {
        let placeholder = Placeholder::new(ids.next_placeholder_id()?, name, source);
        let participant = placeholder.participant();
        self.placeholders.push(placeholder);
        Ok(participant)
    }

    /// Number of rounds in the plan
    pub fn round_count(&self) -> u32 {
        self.matches.iter().map(|m| m.round).max().unwrap_or(0)
    }
}

/// Label for a round given how many teams enter it
pub fn round_label(teams_in_round: usize) -> String {
    match teams_in_round {
        2 => "Final".to_string(),
        4 => "Semifinal".to_string(),
        8 => "Quarterfinal".to_string(),
        n => format!("Round of {n}"),
    }
}

/// Seed positions (0-indexed) in bracket order for a power-of-two field.
///
/// Consecutive pairs meet in the first round: for 8 entrants the order is
/// 1-8, 4-5, 2-7, 3-6, which keeps the top two seeds apart until the final.
pub fn standard_bracket_order(size: usize) -> Vec<usize> {
    let mut order = vec![0];
    while order.len() < size {
        let width = order.len() * 2;
        order = order
            .iter()
            .flat_map(|&seed| [seed, width - 1 - seed])
            .collect();
    }
    order
}

/// Arrange entrants for the first round according to a seeding method
pub fn seed_entrants<T, R>(entrants: &[T], method: SeedingMethod, rng: &mut R) -> BracketResult<Vec<T>>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if entrants.len() < 2 || !entrants.len().is_power_of_two() {
        return Err(BracketError::InvalidEntrantCount(entrants.len()));
    }

    let seeded = match method {
        SeedingMethod::AsListed => entrants.to_vec(),
        SeedingMethod::Standard => standard_bracket_order(entrants.len())
            .into_iter()
            .map(|seed| entrants[seed].clone())
            .collect(),
        SeedingMethod::Random => {
            let mut shuffled = entrants.to_vec();
            shuffled.shuffle(rng);
            shuffled
        }
    };
    Ok(seeded)
}

/// Generate a single-elimination knockout from entrants in seed order
pub fn generate_knockout<R>(
    entrants: &[Participant],
    settings: &KnockoutSettings,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> BracketResult<KnockoutPlan>
where
    R: Rng + ?Sized,
{
    if settings.bracket_type != BracketType::SingleElimination {
        return Err(BracketError::UnsupportedBracketType(settings.bracket_type));
    }

    let seeded = seed_entrants(entrants, settings.seeding, rng)?;
    let plan = build_bracket(&seeded, settings.third_place, ids)?;

    log::info!(
        "Generated knockout: {} entrants, {} matches, {} placeholders",
        entrants.len(),
        plan.matches.len(),
        plan.placeholders.len()
    );
    Ok(plan)
}

/// Generate a fixed-size playoff.
///
/// `fifth_place` supplies the two entrants of the fifth-place match, which
/// usually come from outside the bracket (for example the third-placed
/// teams of two groups).
pub fn generate_playoff(
    entrants: &[Participant],
    fifth_place: Option<[Participant; 2]>,
    settings: &PlayoffSettings,
    ids: &mut IdAllocator,
) -> BracketResult<KnockoutPlan> {
    if !settings.check().is_empty() {
        return Err(BracketError::InvalidBracketSize(settings.bracket_size));
    }
    let expected = settings.bracket_size as usize;
    if entrants.len() != expected {
        return Err(BracketError::EntrantCountMismatch {
            expected,
            actual: entrants.len(),
        });
    }

    let seeded: Vec<Participant> = standard_bracket_order(expected)
        .into_iter()
        .map(|seed| entrants[seed])
        .collect();
    let mut plan = build_bracket(&seeded, settings.third_place, ids)?;

    if settings.fifth_place {
        let [home, away] = fifth_place.ok_or(BracketError::MissingFifthPlaceEntrants)?;
        let round = plan.round_count();
        let id = ids.next_match_id()?;
        plan.matches
            .push(labelled(Match::new(id, home, away).in_round(round), "Fifth place"));
    }

    Ok(plan)
}

/// One group-position placeholder per group and advancing rank.
///
/// Ordered by rank first, so all group winners come before all runners-up.
pub fn group_position_placeholders(
    groups: &[Group],
    teams_advance: u32,
    ids: &mut IdAllocator,
) -> BracketResult<Vec<Placeholder>> {
    let mut placeholders = Vec::with_capacity(groups.len() * teams_advance as usize);
    for position in 1..=teams_advance {
        for group in groups {
            placeholders.push(Placeholder::new(
                ids.next_placeholder_id()?,
                format!("{} of {}", position_name(position), group.name),
                PlaceholderSource::GroupPosition {
                    group_id: group.id,
                    position,
                },
            ));
        }
    }
    Ok(placeholders)
}

fn position_name(position: u32) -> String {
    match position {
        1 => "Winner".to_string(),
        2 => "Runner-up".to_string(),
        n => {
            let suffix = match (n % 10, n % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            format!("{n}{suffix}")
        }
    }
}

fn labelled(mut m: Match, round_label: &str) -> Match {
    m.round_label = Some(round_label.to_string());
    m.match_label = Some(format!("Match {}", m.id));
    m
}

fn build_bracket(
    seeded: &[Participant],
    third_place: bool,
    ids: &mut IdAllocator,
) -> BracketResult<KnockoutPlan> {
    let mut plan = KnockoutPlan::default();
    let total_rounds = seeded.len().trailing_zeros();

    let mut previous: Vec<MatchId> = Vec::with_capacity(seeded.len() / 2);
    for pair in seeded.chunks(2) {
        let id = ids.next_match_id()?;
        let m = Match::new(id, pair[0], pair[1]).in_round(1);
        plan.matches.push(labelled(m, &round_label(seeded.len())));
        previous.push(id);
    }

    let mut semifinals = if seeded.len() == 4 {
        previous.clone()
    } else {
        Vec::new()
    };

    for round in 2..=total_rounds {
        let teams_in_round = seeded.len() >> (round - 1);
        let mut current = Vec::with_capacity(previous.len() / 2);

        for pair in previous.chunks(2) {
            let home = plan.placeholder(
                ids,
                format!("Winner of Match {}", pair[0]),
                PlaceholderSource::MatchWinner { match_id: pair[0] },
            )?;
            let away = plan.placeholder(
                ids,
                format!("Winner of Match {}", pair[1]),
                PlaceholderSource::MatchWinner { match_id: pair[1] },
            )?;
            let id = ids.next_match_id()?;
            let m = Match::new(id, home, away).in_round(round);
            plan.matches.push(labelled(m, &round_label(teams_in_round)));
            current.push(id);
        }

        if teams_in_round == 4 {
            semifinals = current.clone();
        }
        previous = current;
    }

    if third_place && semifinals.len() == 2 {
        let home = plan.placeholder(
            ids,
            format!("Loser of Match {}", semifinals[0]),
            PlaceholderSource::MatchLoser {
                match_id: semifinals[0],
            },
        )?;
        let away = plan.placeholder(
            ids,
            format!("Loser of Match {}", semifinals[1]),
            PlaceholderSource::MatchLoser {
                match_id: semifinals[1],
            },
        )?;
        let id = ids.next_match_id()?;
        let m = Match::new(id, home, away).in_round(total_rounds);
        plan.matches.push(labelled(m, "Third place"));
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn teams(n: i64) -> Vec<Participant> {
        (1..=n).map(Participant::Team).collect()
    }

    #[test]
    fn test_standard_bracket_order() {
        assert_eq!(standard_bracket_order(2), vec![0, 1]);
        assert_eq!(standard_bracket_order(4), vec![0, 3, 1, 2]);
        assert_eq!(standard_bracket_order(8), vec![0, 7, 3, 4, 1, 6, 2, 5]);
    }

    #[test]
    fn test_seed_entrants_rejects_non_power_of_two() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            seed_entrants(&teams(6), SeedingMethod::Standard, &mut rng),
            Err(BracketError::InvalidEntrantCount(6))
        );
        assert!(seed_entrants(&teams(1), SeedingMethod::AsListed, &mut rng).is_err());
    }

    #[test]
    fn test_random_seeding_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seeded = seed_entrants(&teams(8), SeedingMethod::Random, &mut rng).unwrap();
        seeded.sort_by_key(|p| p.team_id());
        assert_eq!(seeded, teams(8));
    }

    #[test]
    fn test_eight_team_knockout_with_third_place() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ids = IdAllocator::new(100, 500);
        let settings = KnockoutSettings {
            third_place: true,
            ..KnockoutSettings::default()
        };
        let plan = generate_knockout(&teams(8), &settings, &mut ids, &mut rng).unwrap();

        // 4 quarterfinals + 2 semifinals + final + third place
        assert_eq!(plan.matches.len(), 8);
        assert_eq!(plan.round_count(), 3);
        // 2 per semifinal, 2 for the final, 2 for third place
        assert_eq!(plan.placeholders.len(), 8);

        let first = &plan.matches[0];
        assert_eq!(first.home, Participant::Team(1));
        assert_eq!(first.away, Participant::Team(8));
        assert_eq!(first.round_label.as_deref(), Some("Quarterfinal"));

        let third = plan
            .matches
            .iter()
            .find(|m| m.round_label.as_deref() == Some("Third place"))
            .unwrap();
        assert_eq!(third.round, 3);
        assert!(third.home.is_pending() && third.away.is_pending());

        let losers = plan
            .placeholders
            .iter()
            .filter(|p| matches!(p.source, PlaceholderSource::MatchLoser { .. }))
            .count();
        assert_eq!(losers, 2);
    }

    #[test]
    fn test_two_team_knockout_is_just_a_final() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ids = IdAllocator::new(1, 1);
        let settings = KnockoutSettings {
            third_place: true,
            ..KnockoutSettings::default()
        };
        let plan = generate_knockout(&teams(2), &settings, &mut ids, &mut rng).unwrap();
        assert_eq!(plan.matches.len(), 1);
        assert!(plan.placeholders.is_empty());
        assert_eq!(plan.matches[0].round_label.as_deref(), Some("Final"));
    }

    #[test]
    fn test_double_elimination_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let settings = KnockoutSettings {
            bracket_type: BracketType::DoubleElimination,
            ..KnockoutSettings::default()
        };
        let result = generate_knockout(&teams(4), &settings, &mut IdAllocator::new(1, 1), &mut rng);
        assert_eq!(
            result,
            Err(BracketError::UnsupportedBracketType(
                BracketType::DoubleElimination
            ))
        );
    }

    #[test]
    fn test_playoff_with_fifth_place() {
        let settings = PlayoffSettings {
            third_place: true,
            fifth_place: true,
            bracket_size: 4,
        };
        let mut ids = IdAllocator::new(1, 1);
        let fifth = [Participant::Pending(90), Participant::Pending(91)];
        let plan = generate_playoff(&teams(4), Some(fifth), &settings, &mut ids).unwrap();

        assert_eq!(plan.matches.len(), 5);
        let fifth_match = plan.matches.last().unwrap();
        assert_eq!(fifth_match.round_label.as_deref(), Some("Fifth place"));
        assert_eq!(fifth_match.round, 2);

        let missing = generate_playoff(&teams(4), None, &settings, &mut IdAllocator::new(1, 1));
        assert_eq!(missing, Err(BracketError::MissingFifthPlaceEntrants));
    }

    #[test]
    fn test_two_team_playoff_matches_its_estimate() {
        let settings = PlayoffSettings {
            third_place: true,
            fifth_place: false,
            bracket_size: 2,
        };
        let plan = generate_playoff(&teams(2), None, &settings, &mut IdAllocator::new(1, 1)).unwrap();
        assert_eq!(plan.matches.len(), 1);
        assert_eq!(plan.matches.len() as u32, settings.estimate_matches(2));
    }

    #[test]
    fn test_playoff_entrant_count_must_match() {
        let settings = PlayoffSettings::default();
        let result = generate_playoff(&teams(8), None, &settings, &mut IdAllocator::new(1, 1));
        assert_eq!(
            result,
            Err(BracketError::EntrantCountMismatch {
                expected: 4,
                actual: 8
            })
        );
    }

    #[test]
    fn test_group_position_placeholders() {
        let groups = vec![
            Group::new(1, "Group A", vec![]),
            Group::new(2, "Group B", vec![]),
        ];
        let mut ids = IdAllocator::new(1, 10);
        let placeholders = group_position_placeholders(&groups, 3, &mut ids).unwrap();

        let names: Vec<&str> = placeholders.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Winner of Group A",
                "Winner of Group B",
                "Runner-up of Group A",
                "Runner-up of Group B",
                "3rd of Group A",
                "3rd of Group B",
            ]
        );
        assert_eq!(placeholders[0].id, 10);
        assert_eq!(ids.next_placeholder_id(), Ok(16));
    }

    #[test]
    fn test_allocator_reports_exhausted_ids() {
        let mut ids = IdAllocator::new(i64::MAX - 1, i64::MAX);
        assert_eq!(ids.next_match_id(), Ok(i64::MAX - 1));
        assert_eq!(
            ids.next_match_id(),
            Err(BracketError::IdsExhausted {
                kind: "match",
                last: i64::MAX
            })
        );
        assert!(ids.next_placeholder_id().is_err());
    }

    #[test]
    fn test_knockout_near_id_limit_fails_cleanly() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut ids = IdAllocator::new(i64::MAX - 2, 1);
        let result = generate_knockout(&teams(8), &KnockoutSettings::default(), &mut ids, &mut rng);
        assert!(matches!(
            result,
            Err(BracketError::IdsExhausted { kind: "match", .. })
        ));
    }
}
