//! Engine configuration.
//!
//! Consolidates the environment variable reads that tune scoring and
//! tie-breaking.

use crate::standings::{ParseRuleError, PointsScheme, StandingsOptions, TiebreakerRule};

/// Values supplied outside the environment, e.g. from command-line flags.
///
/// Each set field wins over its environment variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub points_win: Option<u32>,
    pub points_draw: Option<u32>,
    pub points_loss: Option<u32>,
    pub tiebreakers: Option<Vec<TiebreakerRule>>,
}

/// Engine-wide defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Points per win, draw and loss
    pub points: PointsScheme,
    /// Tie-break order used when a division's format does not name one
    pub default_tiebreakers: Vec<TiebreakerRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            points: PointsScheme::default(),
            default_tiebreakers: TiebreakerRule::default_order(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `POINTS_WIN`, `POINTS_DRAW`, `POINTS_LOSS` and `TIEBREAKERS`
    /// (comma-separated rule names such as `points,goal_difference`).
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(ConfigOverrides::default())
    }

    /// Load configuration from environment variables, letting `overrides`
    /// replace individual values before validation
    pub fn from_env_with(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup_with(|key| std::env::var(key).ok(), overrides)
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with(lookup, ConfigOverrides::default())
    }

    /// Load configuration from a key lookup with overrides applied
    pub fn from_lookup_with<F>(lookup: F, overrides: ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PointsScheme::default();
        let points = PointsScheme {
            win: match overrides.points_win {
                Some(win) => win,
                None => parse_env_or(&lookup, "POINTS_WIN", defaults.win)?,
            },
            draw: match overrides.points_draw {
                Some(draw) => draw,
                None => parse_env_or(&lookup, "POINTS_DRAW", defaults.draw)?,
            },
            loss: match overrides.points_loss {
                Some(loss) => loss,
                None => parse_env_or(&lookup, "POINTS_LOSS", defaults.loss)?,
            },
        };

        let default_tiebreakers = match (overrides.tiebreakers, lookup("TIEBREAKERS")) {
            (Some(rules), _) => rules,
            (None, Some(raw)) => parse_tiebreakers(&raw)?,
            (None, None) => TiebreakerRule::default_order(),
        };

        let config = Self {
            points,
            default_tiebreakers,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.points.win < self.points.draw || self.points.draw < self.points.loss {
            return Err(ConfigError::Invalid {
                var: "POINTS_WIN".to_string(),
                reason: format!(
                    "Points must satisfy win >= draw >= loss (got {}/{}/{})",
                    self.points.win, self.points.draw, self.points.loss
                ),
            });
        }

        if self.default_tiebreakers.is_empty() {
            return Err(ConfigError::Invalid {
                var: "TIEBREAKERS".to_string(),
                reason: "At least one rule is required".to_string(),
            });
        }

        Ok(())
    }

    /// Standings options for a group, preferring the group phase's own rules
    pub fn standings_options(&self, group_rules: Option<&[TiebreakerRule]>) -> StandingsOptions {
        let rules = match group_rules {
            Some(rules) if !rules.is_empty() => rules.to_vec(),
            _ => self.default_tiebreakers.clone(),
        };
        StandingsOptions {
            points: self.points,
            rules,
            tiebreakers: Vec::new(),
        }
    }
}

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse a variable, falling back to `default` when it is unset
fn parse_env_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Parse a comma-separated list of rule names such as `points,wins`
pub fn parse_tiebreakers(raw: &str) -> Result<Vec<TiebreakerRule>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|e: ParseRuleError| ConfigError::Invalid {
                var: "TIEBREAKERS".to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
