//! Score arithmetic for review cycles.
//!
//! All weight and score values are `rust_decimal::Decimal`; every
//! settlement boundary (per item, per block subtotal, final total)
//! rounds half-up to cents so results are deterministic across runs.

pub mod competencies;
pub mod objectives;
pub mod weights;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::domain::{Competency, CompetencyCategory, Objective, WeightSnapshot};
use super::repository::ScoreTotals;

/// Highest rateable proficiency level.
pub const MAX_LEVEL: u8 = 4;

/// The required level every rated competency is expected to carry.
pub const STANDARD_REQUIRED_LEVEL: u8 = 4;

pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A single advisory finding from the readiness validators.
///
/// Violations never block writes; the API boundary decides whether to
/// enforce them.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
pub enum ConstraintViolation {
    #[error("actual level {level} is out of range 0-{max} (competency: {name})", max = MAX_LEVEL)]
    ActualLevelOutOfRange { name: String, level: u8 },
    #[error(
        "required level must be {expected}, found {level} (competency: {name})",
        expected = STANDARD_REQUIRED_LEVEL
    )]
    NonStandardRequiredLevel { name: String, level: u8 },
    #[error("at least one {} competency is required (its weight share is non-zero)", category.label())]
    MissingCategory { category: CompetencyCategory },
    #[error("objective weights sum to {actual}, expected 100.00")]
    ObjectiveWeightSum { actual: Decimal },
    #[error("objective weight {weight} is negative (objective: {title})")]
    NegativeObjectiveWeight { title: String, weight: Decimal },
    #[error("target must be positive (objective: {title})")]
    NonPositiveTarget { title: String },
}

/// Combine both blocks into the persisted score totals.
///
/// Each block arrives already scaled by its frozen snapshot share, so
/// the final score is their sum, settled to cents.
pub fn evaluation_totals(
    objectives: &[Objective],
    competencies: &[Competency],
    weights: &WeightSnapshot,
    cap_overachievement: bool,
) -> ScoreTotals {
    let objectives_block = objectives::objectives_block(objectives, weights, cap_overachievement);
    let competencies_block =
        competencies::competencies_block(competencies, weights, cap_overachievement);

    ScoreTotals {
        objectives: objectives_block.weighted,
        competencies: competencies_block.weighted,
        total: round2(objectives_block.weighted + competencies_block.weighted),
    }
}
