//! Schedule generation.
//!
//! - [`round_robin`]: one match per pair of teams in a group, in
//!   deterministic input order, with a bulk variant over many groups
//! - [`knockout`]: single-elimination and playoff brackets whose later
//!   rounds are filled with placeholders
//!
//! Generators never touch storage. Round-robin returns [`NewMatch`]es that
//! get their IDs on insert; bracket generators take an [`IdAllocator`]
//! because later rounds must refer to earlier matches by ID.
//!
//! [`NewMatch`]: crate::tournament::NewMatch

pub mod errors;
pub mod knockout;
pub mod round_robin;

pub use errors::{BracketError, BracketResult};
pub use knockout::{
    IdAllocator, KnockoutPlan, generate_knockout, generate_playoff, group_position_placeholders,
    round_label, seed_entrants, standard_bracket_order,
};
pub use round_robin::{
    GenerationOutcome, GroupGeneration, generate_for_team_ids, generate_round_robin,
    generate_round_robin_bulk, round_robin_pairs,
};
