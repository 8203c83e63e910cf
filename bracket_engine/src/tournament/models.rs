//! Tournament data models: teams, matches, groups, divisions and placeholders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::FormatConfig;

/// Team ID type
pub type TeamId = i64;

/// Match ID type
pub type MatchId = i64;

/// Group ID type
pub type GroupId = i64;

/// Division ID type
pub type DivisionId = i64;

/// Placeholder ID type
pub type PlaceholderId = i64;

/// A registered team. Owned by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team ID
    pub id: TeamId,
    /// Display name
    pub name: String,
    /// Optional abbreviation used in compact tables
    #[serde(default)]
    pub short_name: Option<String>,
    /// Optional level or tier tag
    #[serde(default)]
    pub level: Option<String>,
}

impl Team {
    /// Create a team with only an ID and a name
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            short_name: None,
            level: None,
        }
    }

    /// Attach a short name
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Attach a level tag
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Short name if present, otherwise the full name
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

/// Match status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    /// Not started yet
    #[default]
    Scheduled,
    /// In progress, score not authoritative
    Live,
    /// Final score recorded
    Finished,
    /// Will not be played
    Cancelled,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "SCHEDULED"),
            MatchStatus::Live => write!(f, "LIVE"),
            MatchStatus::Finished => write!(f, "FINISHED"),
            MatchStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Who occupies a home or away slot.
///
/// A slot either holds a concrete team, a placeholder that still has to be
/// resolved, or nothing at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Participant {
    /// A concrete team
    Team(TeamId),
    /// A placeholder awaiting resolution
    Pending(PlaceholderId),
    /// Nobody assigned yet
    #[default]
    Empty,
}

impl Participant {
    /// Team ID if this slot holds a concrete team
    pub fn team_id(&self) -> Option<TeamId> {
        match self {
            Participant::Team(id) => Some(*id),
            _ => None,
        }
    }

    /// Placeholder ID if this slot is still pending
    pub fn placeholder_id(&self) -> Option<PlaceholderId> {
        match self {
            Participant::Pending(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Participant::Pending(_))
    }
}

/// Result of a finished match from the home team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// A match as persisted by the storage layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match ID
    pub id: MatchId,
    /// Home slot
    pub home: Participant,
    /// Away slot
    pub away: Participant,
    /// Home score (authoritative only when finished)
    #[serde(default)]
    pub home_score: Option<i32>,
    /// Away score (authoritative only when finished)
    #[serde(default)]
    pub away_score: Option<i32>,
    /// Current status
    #[serde(default)]
    pub status: MatchStatus,
    /// Group this match belongs to, if it is a group-phase match
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Round number (1-indexed)
    #[serde(default = "first_round")]
    pub round: u32,
    /// Human-readable round label, e.g. "Semifinal"
    #[serde(default)]
    pub round_label: Option<String>,
    /// Human-readable match label, e.g. "Match 7"
    #[serde(default)]
    pub match_label: Option<String>,
    /// Scheduled kick-off
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

fn first_round() -> u32 {
    1
}

impl Match {
    /// Create a scheduled first-round match
    pub fn new(id: MatchId, home: Participant, away: Participant) -> Self {
        Self {
            id,
            home,
            away,
            home_score: None,
            away_score: None,
            status: MatchStatus::Scheduled,
            group_id: None,
            round: 1,
            round_label: None,
            match_label: None,
            start_time: None,
        }
    }

    /// Create a scheduled match between two concrete teams
    pub fn between(id: MatchId, home: TeamId, away: TeamId) -> Self {
        Self::new(id, Participant::Team(home), Participant::Team(away))
    }

    /// Assign the match to a group
    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Assign the round number
    pub fn in_round(mut self, round: u32) -> Self {
        self.round = round;
        self
    }

    /// Attach a round label
    pub fn with_round_label(mut self, label: impl Into<String>) -> Self {
        self.round_label = Some(label.into());
        self
    }

    /// Record a final result
    pub fn finished(mut self, home_score: i32, away_score: i32) -> Self {
        self.record_result(home_score, away_score);
        self
    }

    /// Record a final result in place
    pub fn record_result(&mut self, home_score: i32, away_score: i32) {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.status = MatchStatus::Finished;
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Finished or cancelled: nothing more will happen to this match
    pub fn is_settled(&self) -> bool {
        matches!(self.status, MatchStatus::Finished | MatchStatus::Cancelled)
    }

    /// Final scores, if the match is finished and both are recorded
    pub fn final_score(&self) -> Option<(i32, i32)> {
        if !self.is_finished() {
            return None;
        }
        Some((self.home_score?, self.away_score?))
    }

    /// Outcome of a finished match
    pub fn outcome(&self) -> Option<MatchOutcome> {
        let (home, away) = self.final_score()?;
        Some(match home.cmp(&away) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        })
    }

    /// Winning slot of a decisive finished match
    pub fn winning_slot(&self) -> Option<Participant> {
        match self.outcome()? {
            MatchOutcome::HomeWin => Some(self.home),
            MatchOutcome::AwayWin => Some(self.away),
            MatchOutcome::Draw => None,
        }
    }

    /// Losing slot of a decisive finished match
    pub fn losing_slot(&self) -> Option<Participant> {
        match self.outcome()? {
            MatchOutcome::HomeWin => Some(self.away),
            MatchOutcome::AwayWin => Some(self.home),
            MatchOutcome::Draw => None,
        }
    }

    /// Winning team of a decisive finished match between concrete teams
    pub fn winner(&self) -> Option<TeamId> {
        self.winning_slot()?.team_id()
    }

    /// Losing team of a decisive finished match between concrete teams
    pub fn loser(&self) -> Option<TeamId> {
        self.losing_slot()?.team_id()
    }

    /// Whether the given team plays in this match
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home.team_id() == Some(team_id) || self.away.team_id() == Some(team_id)
    }

    /// Whether either slot still points at the given placeholder
    pub fn references_placeholder(&self, placeholder_id: PlaceholderId) -> bool {
        self.home.placeholder_id() == Some(placeholder_id)
            || self.away.placeholder_id() == Some(placeholder_id)
    }

    /// Replace every slot holding the placeholder with the team.
    ///
    /// Returns the number of slots rewritten (0, 1 or 2).
    pub fn replace_placeholder(&mut self, placeholder_id: PlaceholderId, team_id: TeamId) -> usize {
        let mut replaced = 0;
        for slot in [&mut self.home, &mut self.away] {
            if slot.placeholder_id() == Some(placeholder_id) {
                *slot = Participant::Team(team_id);
                replaced += 1;
            }
        }
        replaced
    }
}

/// A match produced by a generator that has not been stored yet.
///
/// The storage layer assigns the ID on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub home: Participant,
    pub away: Participant,
    pub status: MatchStatus,
    pub group_id: Option<GroupId>,
    pub round: u32,
    pub round_label: Option<String>,
    pub match_label: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
}

impl NewMatch {
    /// Turn into a stored match once an ID is known
    pub fn into_match(self, id: MatchId) -> Match {
        Match {
            id,
            home: self.home,
            away: self.away,
            home_score: None,
            away_score: None,
            status: self.status,
            group_id: self.group_id,
            round: self.round,
            round_label: self.round_label,
            match_label: self.match_label,
            start_time: self.start_time,
        }
    }
}

/// A group of teams playing each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group ID
    pub id: GroupId,
    /// Display name, e.g. "Group A"
    pub name: String,
    /// Member teams in registration order
    #[serde(default)]
    pub team_ids: Vec<TeamId>,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>, team_ids: Vec<TeamId>) -> Self {
        Self {
            id,
            name: name.into(),
            team_ids,
        }
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.team_ids.contains(&team_id)
    }
}

/// A division: its groups and its phase structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Division {
    /// Division ID
    pub id: DivisionId,
    /// Display name, e.g. "U12 Boys"
    pub name: String,
    /// Groups of the group phase
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Phase structure
    #[serde(default)]
    pub format: FormatConfig,
}

impl Division {
    pub fn new(id: DivisionId, name: impl Into<String>, groups: Vec<Group>) -> Self {
        Self {
            id,
            name: name.into(),
            groups,
            format: FormatConfig::default(),
        }
    }

    pub fn with_format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }

    /// Get group by ID
    pub fn group(&self, group_id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }
}

/// Where a placeholder takes its team from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaceholderSource {
    /// The team finishing at `position` (1-indexed) in a group
    GroupPosition { group_id: GroupId, position: u32 },
    /// The winner of a match
    MatchWinner { match_id: MatchId },
    /// The loser of a match
    MatchLoser { match_id: MatchId },
}

/// Malformed placeholder source
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Group position must be 1 or greater (group {group_id})")]
    ZeroPosition { group_id: GroupId },
}

impl PlaceholderSource {
    /// Validate source parameters
    pub fn validate(&self) -> Result<(), SourceError> {
        if let PlaceholderSource::GroupPosition {
            group_id,
            position: 0,
        } = *self
        {
            return Err(SourceError::ZeroPosition { group_id });
        }
        Ok(())
    }

    /// Source match, for match-outcome sources
    pub fn source_match(&self) -> Option<MatchId> {
        match self {
            PlaceholderSource::MatchWinner { match_id }
            | PlaceholderSource::MatchLoser { match_id } => Some(*match_id),
            PlaceholderSource::GroupPosition { .. } => None,
        }
    }
}

/// A symbolic stand-in for a team that is not known yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Placeholder ID (shares the slot namespace with teams via [`Participant`])
    pub id: PlaceholderId,
    /// Display name, e.g. "Winner of Group A"
    pub name: String,
    /// What the placeholder resolves from
    pub source: PlaceholderSource,
}

impl Placeholder {
    pub fn new(id: PlaceholderId, name: impl Into<String>, source: PlaceholderSource) -> Self {
        Self {
            id,
            name: name.into(),
            source,
        }
    }

    /// Slot value referring to this placeholder
    pub fn participant(&self) -> Participant {
        Participant::Pending(self.id)
    }
}
