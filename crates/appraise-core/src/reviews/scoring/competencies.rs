use rust_decimal::Decimal;

use super::super::domain::{Competency, CompetencyCategory, WeightSnapshot};
use super::{round2, ConstraintViolation, MAX_LEVEL, STANDARD_REQUIRED_LEVEL};

/// Competencies subtotal and its evaluation-level contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetenciesBlock {
    /// Sum of per-competency scores in percentage points. Bounded by the
    /// sum of the snapshot's category shares.
    pub subtotal: Decimal,
    /// The subtotal scaled down to the snapshot's competencies share.
    pub weighted: Decimal,
}

/// Score for a single competency: proficiency ratio times the weight the
/// redistribution pass assigned to it, settled to cents.
///
/// A required level of 0 marks the competency not applicable; it scores 0
/// and never divides.
pub fn competency_score(competency: &Competency, cap_overachievement: bool) -> Decimal {
    if competency.required_level == 0 {
        return Decimal::ZERO;
    }
    let mut ratio =
        Decimal::from(competency.actual_level) / Decimal::from(competency.required_level);
    if cap_overachievement {
        ratio = ratio.clamp(Decimal::ZERO, Decimal::ONE);
    }
    round2(ratio * competency.weight)
}

/// Aggregate the competencies block. An evaluation with no competencies
/// contributes 0; competencies are optional.
pub fn competencies_block(
    competencies: &[Competency],
    weights: &WeightSnapshot,
    cap_overachievement: bool,
) -> CompetenciesBlock {
    let mut subtotal = Decimal::ZERO;
    for competency in competencies {
        subtotal += competency_score(competency, cap_overachievement);
    }
    let subtotal = round2(subtotal);
    let weighted = round2(subtotal * weights.competencies_pct / Decimal::ONE_HUNDRED);

    CompetenciesBlock { subtotal, weighted }
}

/// Advisory readiness checks for an evaluation's competency set.
///
/// An empty set always passes. A non-empty set must keep every actual
/// level in range, every required level at the standard value, and must
/// cover each category whose frozen share is non-zero; zero-weighted
/// categories are never required.
pub fn validate_competencies(
    competencies: &[Competency],
    weights: &WeightSnapshot,
) -> Vec<ConstraintViolation> {
    if competencies.is_empty() {
        return Vec::new();
    }

    let mut violations = Vec::new();

    for competency in competencies {
        if competency.actual_level > MAX_LEVEL {
            violations.push(ConstraintViolation::ActualLevelOutOfRange {
                name: competency.name.clone(),
                level: competency.actual_level,
            });
        }
        if competency.required_level != STANDARD_REQUIRED_LEVEL {
            violations.push(ConstraintViolation::NonStandardRequiredLevel {
                name: competency.name.clone(),
                level: competency.required_level,
            });
        }
    }

    for category in CompetencyCategory::ALL {
        if weights.category_pct(category) <= Decimal::ZERO {
            continue;
        }
        let covered = competencies
            .iter()
            .any(|competency| competency.category == category);
        if !covered {
            violations.push(ConstraintViolation::MissingCategory { category });
        }
    }

    violations
}
