//! Subcommands and their JSON request documents.

use anyhow::{Context, Result, bail};
use bracket_engine::{
    bracket::map_advancement,
    config::EngineConfig,
    format::{FormatConfig, KnockoutSettings, estimate_match_count, validate_format},
    placeholder::{PlaceholderResolver, ResolutionReport},
    schedule::{
        IdAllocator, KnockoutPlan, generate_knockout, generate_round_robin,
        generate_round_robin_bulk,
    },
    standings::{TiebreakerRule, compute_standings_with},
    tournament::{
        Division, Group, GroupId, Match, MatchId, Participant, Placeholder, PlaceholderId, Team,
    },
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A CLI subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Standings,
    RoundRobin,
    ScheduleGroups,
    Validate,
    Estimate,
    Advancement,
    Resolve,
    Knockout,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Standings,
        Command::RoundRobin,
        Command::ScheduleGroups,
        Command::Validate,
        Command::Estimate,
        Command::Advancement,
        Command::Resolve,
        Command::Knockout,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::Standings => "standings",
            Command::RoundRobin => "round-robin",
            Command::ScheduleGroups => "schedule-groups",
            Command::Validate => "validate",
            Command::Estimate => "estimate",
            Command::Advancement => "advancement",
            Command::Resolve => "resolve",
            Command::Knockout => "knockout",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .with_context(|| format!("Unknown command '{s}'"))
    }
}

#[derive(Debug, Deserialize)]
struct StandingsRequest {
    teams: Vec<Team>,
    #[serde(default)]
    matches: Vec<Match>,
    /// Overrides the configured tie-break order
    #[serde(default)]
    tiebreakers: Option<Vec<TiebreakerRule>>,
}

#[derive(Debug, Deserialize)]
struct RoundRobinRequest {
    group_id: GroupId,
    teams: Vec<Team>,
}

#[derive(Debug, Deserialize)]
struct ScheduleGroupsRequest {
    groups: Vec<Group>,
    #[serde(default)]
    existing: Vec<Match>,
}

#[derive(Debug, Deserialize)]
struct EstimateRequest {
    team_count: u32,
    format: FormatConfig,
}

#[derive(Debug, Serialize)]
struct EstimateResponse {
    team_count: u32,
    estimated_matches: u32,
}

#[derive(Debug, Deserialize)]
struct AdvancementRequest {
    matches: Vec<Match>,
    #[serde(default)]
    placeholders: Vec<Placeholder>,
}

#[derive(Debug, Deserialize)]
struct ResolveRequest {
    division: Division,
    matches: Vec<Match>,
    placeholders: Vec<Placeholder>,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    report: ResolutionReport,
    matches: Vec<Match>,
    placeholders: Vec<Placeholder>,
}

#[derive(Debug, Deserialize)]
struct KnockoutRequest {
    entrants: Vec<Participant>,
    #[serde(default)]
    settings: KnockoutSettings,
    first_match_id: MatchId,
    first_placeholder_id: PlaceholderId,
    /// Fixed seed for reproducible random draws
    #[serde(default)]
    seed: Option<u64>,
}

/// Run a subcommand on a JSON request and return pretty JSON
pub fn run(command: Command, input: &str, config: &EngineConfig) -> Result<String> {
    log::debug!("Running '{}' on {} bytes of input", command, input.len());

    let output = match command {
        Command::Standings => {
            let request: StandingsRequest = parse(command, input)?;
            let options = config.standings_options(request.tiebreakers.as_deref());
            let table = compute_standings_with(&request.teams, &request.matches, &options);
            serde_json::to_value(table)?
        }
        Command::RoundRobin => {
            let request: RoundRobinRequest = parse(command, input)?;
            serde_json::to_value(generate_round_robin(&request.teams, request.group_id))?
        }
        Command::ScheduleGroups => {
            let request: ScheduleGroupsRequest = parse(command, input)?;
            serde_json::to_value(generate_round_robin_bulk(&request.groups, &request.existing))?
        }
        Command::Validate => {
            let format: FormatConfig = parse(command, input)?;
            serde_json::to_value(validate_format(&format))?
        }
        Command::Estimate => {
            let request: EstimateRequest = parse(command, input)?;
            serde_json::to_value(EstimateResponse {
                team_count: request.team_count,
                estimated_matches: estimate_match_count(request.team_count, &request.format),
            })?
        }
        Command::Advancement => {
            let request: AdvancementRequest = parse(command, input)?;
            serde_json::to_value(map_advancement(&request.matches, &request.placeholders))?
        }
        Command::Resolve => {
            let mut request: ResolveRequest = parse(command, input)?;
            let resolver = PlaceholderResolver::new(config.clone());
            let report = resolver.resolve(
                &request.division,
                &mut request.placeholders,
                &mut request.matches,
            );
            serde_json::to_value(ResolveResponse {
                report,
                matches: request.matches,
                placeholders: request.placeholders,
            })?
        }
        Command::Knockout => {
            let request: KnockoutRequest = parse(command, input)?;
            serde_json::to_value(knockout(&request)?)?
        }
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

fn knockout(request: &KnockoutRequest) -> Result<KnockoutPlan> {
    let mut ids = IdAllocator::new(request.first_match_id, request.first_placeholder_id);
    let plan = match request.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            generate_knockout(&request.entrants, &request.settings, &mut ids, &mut rng)
        }
        None => {
            let mut rng = rand::rng();
            generate_knockout(&request.entrants, &request.settings, &mut ids, &mut rng)
        }
    };
    plan.with_context(|| format!("Cannot build a bracket for {} entrants", request.entrants.len()))
}

fn parse<T: for<'de> Deserialize<'de>>(command: Command, input: &str) -> Result<T> {
    if input.trim().is_empty() {
        bail!("Empty input for '{command}'");
    }
    serde_json::from_str(input).with_context(|| format!("Invalid input document for '{command}'"))
}
