use rust_decimal::Decimal;

use super::super::domain::{Objective, WeightSnapshot};
use super::weights::OBJECTIVE_WEIGHT_TOTAL;
use super::{round2, ConstraintViolation};

/// Objectives subtotal and its evaluation-level contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectivesBlock {
    /// Sum of per-objective achievement in percentage points (0..100
    /// once the weights sum to 100).
    pub subtotal: Decimal,
    /// The subtotal scaled down to the snapshot's objectives share.
    pub weighted: Decimal,
}

/// Achievement ratio for one objective, clamped to [0, 1] when
/// `cap_overachievement` is set. `None` when the target is absent or
/// non-positive: such items contribute nothing rather than dividing.
fn achievement_ratio(objective: &Objective, cap_overachievement: bool) -> Option<Decimal> {
    let target = objective.target.filter(|target| *target > Decimal::ZERO)?;
    let achieved = objective.achieved?;
    let mut ratio = achieved / target;
    if cap_overachievement {
        ratio = ratio.clamp(Decimal::ZERO, Decimal::ONE);
    }
    Some(ratio)
}

/// Score for a single objective: achievement ratio times its weight
/// share, settled to cents. Missing or non-positive targets and missing
/// achieved values score 0.
pub fn objective_score(objective: &Objective, cap_overachievement: bool) -> Decimal {
    match achievement_ratio(objective, cap_overachievement) {
        Some(ratio) => round2(ratio * objective.weight),
        None => Decimal::ZERO,
    }
}

/// Aggregate the objectives block. Per-item contributions accumulate at
/// full precision; the subtotal and the weighted result are each settled
/// to cents.
pub fn objectives_block(
    objectives: &[Objective],
    weights: &WeightSnapshot,
    cap_overachievement: bool,
) -> ObjectivesBlock {
    let mut subtotal = Decimal::ZERO;
    for objective in objectives {
        if let Some(ratio) = achievement_ratio(objective, cap_overachievement) {
            subtotal += ratio * objective.weight;
        }
    }
    let subtotal = round2(subtotal);
    let weighted = round2(subtotal / Decimal::ONE_HUNDRED * weights.objectives_pct);

    ObjectivesBlock { subtotal, weighted }
}

/// Advisory readiness checks for an evaluation's objective set.
///
/// An empty set always passes. A non-empty set must carry weights that
/// sum to exactly 100.00 with no negative share, and any stated target
/// must be positive.
pub fn validate_objectives(objectives: &[Objective]) -> Vec<ConstraintViolation> {
    if objectives.is_empty() {
        return Vec::new();
    }

    let mut violations = Vec::new();

    let weight_sum: Decimal = objectives.iter().map(|objective| objective.weight).sum();
    if weight_sum != OBJECTIVE_WEIGHT_TOTAL {
        violations.push(ConstraintViolation::ObjectiveWeightSum { actual: weight_sum });
    }

    for objective in objectives {
        if objective.weight < Decimal::ZERO {
            violations.push(ConstraintViolation::NegativeObjectiveWeight {
                title: objective.title.clone(),
                weight: objective.weight,
            });
        }
        if let Some(target) = objective.target {
            if target <= Decimal::ZERO {
                violations.push(ConstraintViolation::NonPositiveTarget {
                    title: objective.title.clone(),
                });
            }
        }
    }

    violations
}
