//! Format validation and match-count estimation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::errors::{FormatError, FormatResult};
use super::models::{FormatConfig, PhaseKind, PhaseRules};

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatIssue {
    /// Name of the offending phase, when the issue belongs to one
    pub phase: Option<String>,
    pub message: String,
}

impl FormatIssue {
    fn general(message: impl Into<String>) -> Self {
        Self {
            phase: None,
            message: message.into(),
        }
    }

    fn for_phase(phase: &str, message: impl Into<String>) -> Self {
        Self {
            phase: Some(phase.to_string()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.phase {
            Some(phase) => write!(f, "phase '{}': {}", phase, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Outcome of validating a format configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatValidation {
    pub is_valid: bool,
    pub errors: Vec<FormatIssue>,
    pub warnings: Vec<FormatIssue>,
}

impl std::fmt::Display for FormatValidation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let errors: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", errors.join("; "))
    }
}

/// Validate a division's phase structure.
///
/// Errors make the configuration invalid. Phase sequencing problems are
/// only reported as warnings because downstream data may already depend
/// on them.
pub fn validate_format(config: &FormatConfig) -> FormatValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let enabled = config.enabled_phases();

    if enabled.is_empty() {
        errors.push(FormatIssue::general(
            "Format must contain at least one enabled phase",
        ));
    }

    let mut by_order: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
    for phase in &enabled {
        by_order
            .entry(phase.order)
            .or_default()
            .push(phase.name.as_str());
    }
    for (order, names) in &by_order {
        if names.len() > 1 {
            errors.push(FormatIssue::general(format!(
                "Duplicate phase order {} used by phases {}",
                order,
                names
                    .iter()
                    .map(|n| format!("'{n}'"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
    }

    for phase in &enabled {
        for problem in phase.settings.check() {
            errors.push(FormatIssue::for_phase(&phase.name, problem));
        }
    }

    let last_group = enabled
        .iter()
        .filter(|p| p.kind() == PhaseKind::Group)
        .map(|p| p.order)
        .max();
    let first_bracket = enabled
        .iter()
        .filter(|p| p.kind().is_bracket())
        .map(|p| p.order)
        .min();
    if let (Some(last_group), Some(first_bracket)) = (last_group, first_bracket) {
        if last_group >= first_bracket {
            warnings.push(FormatIssue::general(format!(
                "Group phase (order {last_group}) should come before knockout/playoff phases (order {first_bracket})"
            )));
        }
    }

    for warning in &warnings {
        log::warn!("Format validation warning: {}", warning);
    }

    FormatValidation {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Estimate how many matches a format produces for `team_count` teams.
///
/// Capacity planning only; actual schedules may differ. The total
/// saturates at `u32::MAX`.
pub fn estimate_match_count(team_count: u32, config: &FormatConfig) -> u32 {
    config
        .enabled_phases()
        .iter()
        .map(|p| p.settings.estimate_matches(team_count))
        .fold(0, u32::saturating_add)
}

impl FormatConfig {
    /// Parse and validate a JSON format document.
    ///
    /// Warnings are logged; errors reject the document.
    pub fn try_from_json(json: &str) -> FormatResult<Self> {
        let config: FormatConfig = serde_json::from_str(json)?;
        let validation = validate_format(&config);
        if !validation.is_valid {
            return Err(FormatError::Invalid(validation));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{GroupSettings, KnockoutSettings, Phase, PlayoffSettings};

    fn group(min: u32, max: u32, advance: u32) -> GroupSettings {
        GroupSettings {
            min_teams_per_group: min,
            max_teams_per_group: max,
            teams_advance: advance,
            ..GroupSettings::default()
        }
    }

    #[test]
    fn test_valid_group_then_knockout() {
        let config = FormatConfig::group_then_knockout(group(3, 4, 2), KnockoutSettings::default());
        let result = validate_format(&config);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_no_enabled_phase() {
        let config = FormatConfig::new(vec![Phase::new("Groups", 1, group(3, 4, 2)).disabled()]);
        let result = validate_format(&config);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_min_greater_than_max() {
        let config = FormatConfig::new(vec![Phase::new("Groups", 1, group(6, 4, 2))]);
        let result = validate_format(&config);
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].phase.as_deref(), Some("Groups"));
        assert!(result.errors[0].message.contains("Min teams per group (6)"));
        assert!(result.errors[0].message.contains("max teams per group (4)"));
    }

    #[test]
    fn test_duplicate_orders_among_enabled_only() {
        let config = FormatConfig::new(vec![
            Phase::new("Groups", 1, group(3, 4, 2)),
            Phase::new("Knockout", 1, KnockoutSettings::default()),
            Phase::new("Playoff", 2, PlayoffSettings::default()).disabled(),
            Phase::new("Extra", 2, KnockoutSettings::default()),
        ]);
        let result = validate_format(&config);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("Duplicate phase order 1"));
    }

    #[test]
    fn test_group_after_knockout_is_only_a_warning() {
        let config = FormatConfig::new(vec![
            Phase::new("Knockout", 1, KnockoutSettings::default()),
            Phase::new("Groups", 2, group(3, 4, 2)),
        ]);
        let result = validate_format(&config);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_estimate_sums_enabled_phases() {
        let config = FormatConfig::new(vec![
            Phase::new("Groups", 1, group(3, 4, 2)),
            Phase::new(
                "Knockout",
                2,
                KnockoutSettings {
                    third_place: true,
                    ..KnockoutSettings::default()
                },
            ),
            Phase::new("Playoff", 3, PlayoffSettings::default()).disabled(),
        ]);
        // 2 groups x 6 + (8 - 1 + 1)
        assert_eq!(estimate_match_count(8, &config), 20);
    }

    #[test]
    fn test_estimate_total_saturates() {
        let config = FormatConfig::group_then_knockout(
            group(1, 60_000, 1),
            KnockoutSettings {
                third_place: true,
                ..KnockoutSettings::default()
            },
        );
        assert_eq!(estimate_match_count(60_000, &config), 1_799_970_000 + 60_000);
        assert_eq!(estimate_match_count(100_000, &config), u32::MAX);
    }

    #[test]
    fn test_try_from_json_rejects_invalid() {
        let json = r#"{"phases":[{"name":"Groups","order":1,"settings":{"type":"group","min_teams_per_group":6,"max_teams_per_group":4,"teams_advance":2}}]}"#;
        match FormatConfig::try_from_json(json) {
            Err(FormatError::Invalid(validation)) => assert!(!validation.is_valid),
            other => panic!("expected validation error, got {other:?}"),
        }

        assert!(matches!(
            FormatConfig::try_from_json("{\"phases\": 3}"),
            Err(FormatError::Parse(_))
        ));
    }
}
