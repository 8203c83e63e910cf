//! Phase and format configuration models.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::standings::TiebreakerRule;

/// Broad category of a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Group,
    Knockout,
    Playoff,
}

impl PhaseKind {
    /// Knockout and playoff phases are both elimination brackets
    pub fn is_bracket(&self) -> bool {
        matches!(self, PhaseKind::Knockout | PhaseKind::Playoff)
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseKind::Group => write!(f, "group"),
            PhaseKind::Knockout => write!(f, "knockout"),
            PhaseKind::Playoff => write!(f, "playoff"),
        }
    }
}

/// Behaviour every kind of phase settings provides
#[enum_dispatch]
pub trait PhaseRules {
    /// Phase category
    fn kind(&self) -> PhaseKind;

    /// Problems with the settings themselves (empty when valid)
    fn check(&self) -> Vec<String>;

    /// Rough number of matches this phase produces for `team_count` teams.
    ///
    /// Saturates at `u32::MAX` instead of overflowing.
    fn estimate_matches(&self, team_count: u32) -> u32;
}

/// Type-specific phase settings
#[enum_dispatch(PhaseRules)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PhaseSettings {
    Group(GroupSettings),
    Knockout(KnockoutSettings),
    Playoff(PlayoffSettings),
}

/// Group phase settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSettings {
    /// Minimum teams per group
    pub min_teams_per_group: u32,
    /// Maximum teams per group
    pub max_teams_per_group: u32,
    /// Teams per group advancing to the next phase
    pub teams_advance: u32,
    /// Tie-break order for group tables
    #[serde(default = "TiebreakerRule::default_order")]
    pub tiebreakers: Vec<TiebreakerRule>,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            min_teams_per_group: 3,
            max_teams_per_group: 4,
            teams_advance: 2,
            tiebreakers: TiebreakerRule::default_order(),
        }
    }
}

impl PhaseRules for GroupSettings {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Group
    }

    fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.max_teams_per_group == 0 {
            problems.push("Max teams per group must be at least 1".to_string());
        }

        if self.min_teams_per_group > self.max_teams_per_group {
            problems.push(format!(
                "Min teams per group ({}) cannot exceed max teams per group ({})",
                self.min_teams_per_group, self.max_teams_per_group
            ));
        }

        if self.teams_advance > self.max_teams_per_group {
            problems.push(format!(
                "Teams advancing ({}) cannot exceed max teams per group ({})",
                self.teams_advance, self.max_teams_per_group
            ));
        }

        problems
    }

    fn estimate_matches(&self, team_count: u32) -> u32 {
        if team_count == 0 || self.max_teams_per_group == 0 {
            return 0;
        }
        let group_count = team_count.div_ceil(self.max_teams_per_group);
        let per_group = u64::from(self.max_teams_per_group.min(team_count));
        let pairs = per_group * per_group.saturating_sub(1) / 2;
        u32::try_from(pairs)
            .unwrap_or(u32::MAX)
            .saturating_mul(group_count)
    }
}

/// How entrants are placed into a knockout bracket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingMethod {
    /// 1 vs N, 2 vs N-1, with top seeds kept apart until late rounds
    #[default]
    Standard,
    /// Random draw
    Random,
    /// Consecutive entrants play each other
    AsListed,
}

/// Elimination style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketType {
    #[default]
    SingleElimination,
    DoubleElimination,
}

/// Knockout phase settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutSettings {
    /// Play a third-place match between the semifinal losers
    #[serde(default)]
    pub third_place: bool,
    #[serde(default)]
    pub seeding: SeedingMethod,
    #[serde(default)]
    pub bracket_type: BracketType,
}

impl PhaseRules for KnockoutSettings {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Knockout
    }

    fn check(&self) -> Vec<String> {
        Vec::new()
    }

    fn estimate_matches(&self, team_count: u32) -> u32 {
        if team_count < 2 {
            return 0;
        }
        match self.bracket_type {
            BracketType::SingleElimination => {
                (team_count - 1).saturating_add(third_place_matches(self.third_place, team_count))
            }
            BracketType::DoubleElimination => (team_count - 1).saturating_mul(2),
        }
    }
}

/// Fixed-size playoff settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffSettings {
    /// Play a third-place match
    #[serde(default)]
    pub third_place: bool,
    /// Play a fifth-place match
    #[serde(default)]
    pub fifth_place: bool,
    /// Number of teams in the bracket (power of two)
    pub bracket_size: u32,
}

impl Default for PlayoffSettings {
    fn default() -> Self {
        Self {
            third_place: true,
            fifth_place: false,
            bracket_size: 4,
        }
    }
}

impl PhaseRules for PlayoffSettings {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Playoff
    }

    fn check(&self) -> Vec<String> {
        if self.bracket_size < 2 || !self.bracket_size.is_power_of_two() {
            return vec![format!(
                "Playoff bracket size ({}) must be a power of two of at least 2",
                self.bracket_size
            )];
        }
        Vec::new()
    }

    fn estimate_matches(&self, _team_count: u32) -> u32 {
        if self.bracket_size < 2 {
            return 0;
        }
        (self.bracket_size - 1)
            .saturating_add(third_place_matches(self.third_place, self.bracket_size))
            .saturating_add(u32::from(self.fifth_place))
    }
}

/// A third-place match needs two semifinal losers
fn third_place_matches(enabled: bool, bracket_size: u32) -> u32 {
    u32::from(enabled && bracket_size >= 4)
}

/// A stage of a division's competition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Display name, e.g. "Group stage"
    pub name: String,
    /// Position in the phase sequence
    pub order: u32,
    /// Disabled phases are ignored everywhere
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Type-specific settings
    pub settings: PhaseSettings,
}

fn default_enabled() -> bool {
    true
}

impl Phase {
    pub fn new(name: impl Into<String>, order: u32, settings: impl Into<PhaseSettings>) -> Self {
        Self {
            name: name.into(),
            order,
            enabled: true,
            settings: settings.into(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn kind(&self) -> PhaseKind {
        self.settings.kind()
    }
}

/// A division's phase structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default)]
    pub phases: Vec<Phase>,
}

impl FormatConfig {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// Classic format: one group phase followed by a single-elimination knockout
    pub fn group_then_knockout(group: GroupSettings, knockout: KnockoutSettings) -> Self {
        Self::new(vec![
            Phase::new("Group stage", 1, group),
            Phase::new("Knockout stage", 2, knockout),
        ])
    }

    /// Enabled phases sorted by order
    pub fn enabled_phases(&self) -> Vec<&Phase> {
        let mut phases: Vec<&Phase> = self.phases.iter().filter(|p| p.enabled).collect();
        phases.sort_by_key(|p| p.order);
        phases
    }

    /// Settings of the first enabled group phase
    pub fn group_settings(&self) -> Option<&GroupSettings> {
        self.enabled_phases()
            .into_iter()
            .find_map(|p| match &p.settings {
                PhaseSettings::Group(settings) => Some(settings),
                _ => None,
            })
    }

    /// Settings of the first enabled knockout phase
    pub fn knockout_settings(&self) -> Option<&KnockoutSettings> {
        self.enabled_phases()
            .into_iter()
            .find_map(|p| match &p.settings {
                PhaseSettings::Knockout(settings) => Some(settings),
                _ => None,
            })
    }
}
