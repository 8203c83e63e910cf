//! Format configuration model.
//!
//! A division's competition is a sequence of phases, each a group stage, a
//! knockout or a fixed-size playoff. This module provides:
//! - Tagged [`PhaseSettings`] with per-kind behaviour through [`PhaseRules`]
//! - [`validate_format`] returning errors and non-fatal warnings
//! - [`estimate_match_count`] for capacity planning
//! - [`FormatConfig::try_from_json`] for validating documents at the boundary
//!
//! ## Example
//!
//! ```
//! use bracket_engine::format::{
//!     FormatConfig, GroupSettings, KnockoutSettings, estimate_match_count, validate_format,
//! };
//!
//! let config = FormatConfig::group_then_knockout(
//!     GroupSettings::default(),
//!     KnockoutSettings::default(),
//! );
//!
//! assert!(validate_format(&config).is_valid);
//! assert_eq!(estimate_match_count(8, &config), 12 + 7);
//! ```

pub mod errors;
pub mod models;
pub mod validation;

pub use errors::{FormatError, FormatResult};
pub use models::{
    BracketType, FormatConfig, GroupSettings, KnockoutSettings, Phase, PhaseKind, PhaseRules,
    PhaseSettings, PlayoffSettings, SeedingMethod,
};
pub use validation::{FormatIssue, FormatValidation, estimate_match_count, validate_format};
