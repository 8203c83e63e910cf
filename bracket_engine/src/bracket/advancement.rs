//! Winner/loser routing between bracket rounds.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::tournament::{Match, MatchId, Placeholder, PlaceholderId, PlaceholderSource};

/// Where the winner and loser of a match go next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advancement {
    pub winner_target: Option<MatchId>,
    pub loser_target: Option<MatchId>,
}

impl Advancement {
    /// Neither winner nor loser goes anywhere
    pub fn is_terminal(&self) -> bool {
        self.winner_target.is_none() && self.loser_target.is_none()
    }
}

/// Matches grouped by round number
pub fn rounds(matches: &[Match]) -> BTreeMap<u32, Vec<&Match>> {
    let mut by_round: BTreeMap<u32, Vec<&Match>> = BTreeMap::new();
    for m in matches {
        by_round.entry(m.round).or_default().push(m);
    }
    by_round
}

/// Map each match to the next-round matches its winner and loser feed into.
///
/// A match in round R targets the match of the next round present whose
/// slot holds a placeholder sourced from it. Every input match gets an
/// entry; matches of the last round are terminal. The map is derived from
/// the current slots and placeholders and is never stored.
pub fn map_advancement(
    matches: &[Match],
    placeholders: &[Placeholder],
) -> BTreeMap<MatchId, Advancement> {
    let sources: HashMap<PlaceholderId, PlaceholderSource> =
        placeholders.iter().map(|p| (p.id, p.source)).collect();

    let mut map: BTreeMap<MatchId, Advancement> = matches
        .iter()
        .map(|m| (m.id, Advancement::default()))
        .collect();

    let by_round = rounds(matches);
    let round_numbers: Vec<u32> = by_round.keys().copied().collect();

    for window in round_numbers.windows(2) {
        let (current, next) = (window[0], window[1]);
        let in_current: Vec<MatchId> = by_round[&current].iter().map(|m| m.id).collect();

        for target in &by_round[&next] {
            for slot in [target.home, target.away] {
                let Some(source) = slot.placeholder_id().and_then(|id| sources.get(&id)) else {
                    continue;
                };
                match *source {
                    PlaceholderSource::MatchWinner { match_id } if in_current.contains(&match_id) => {
                        if let Some(entry) = map.get_mut(&match_id) {
                            entry.winner_target.get_or_insert(target.id);
                        }
                    }
                    PlaceholderSource::MatchLoser { match_id } if in_current.contains(&match_id) => {
                        if let Some(entry) = map.get_mut(&match_id) {
                            entry.loser_target.get_or_insert(target.id);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    log::debug!(
        "Mapped advancement for {} matches across {} rounds",
        map.len(),
        round_numbers.len()
    );
    map
}
