use rust_decimal::{Decimal, RoundingStrategy};

use super::super::domain::{
    Competency, CompetencyCategory, CompetencyId, Objective, ObjectiveId, WeightSnapshot,
};

/// Objectives always split a fixed 100.00% among themselves.
pub const OBJECTIVE_WEIGHT_TOTAL: Decimal = Decimal::ONE_HUNDRED;

/// Split `total` into `count` equal shares at cent precision.
///
/// Every share except the last is the half-up-rounded even division; the
/// last share absorbs the full rounding remainder so the group sums to
/// `total` exactly. An empty group yields no shares.
pub fn equal_shares(total: Decimal, count: usize) -> Vec<Decimal> {
    if count == 0 {
        return Vec::new();
    }
    let even = (total / Decimal::from(count as u64))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let mut shares = vec![even; count - 1];
    let used: Decimal = shares.iter().copied().sum();
    shares.push(total - used);
    shares
}

/// Weight corrections for one objective group, pairing each drifted item
/// with its recomputed share. Items already holding the right weight are
/// left out so the caller persists nothing for them.
pub fn objective_weight_plan(objectives: &[Objective]) -> Vec<(ObjectiveId, Decimal)> {
    let shares = equal_shares(OBJECTIVE_WEIGHT_TOTAL, objectives.len());
    objectives
        .iter()
        .zip(shares)
        .filter(|(objective, share)| objective.weight != *share)
        .map(|(objective, share)| (objective.id.clone(), share))
        .collect()
}

/// Weight corrections for one evaluation's competencies.
///
/// Each category splits its frozen snapshot share among its own members.
/// A category whose snapshot share is zero forces every member to weight
/// 0 instead of dividing.
pub fn competency_weight_plan(
    competencies: &[Competency],
    weights: &WeightSnapshot,
) -> Vec<(CompetencyId, Decimal)> {
    let mut plan = Vec::new();

    for category in CompetencyCategory::ALL {
        let members: Vec<&Competency> = competencies
            .iter()
            .filter(|competency| competency.category == category)
            .collect();
        if members.is_empty() {
            continue;
        }

        let total = weights.category_pct(category);
        if total <= Decimal::ZERO {
            for member in members {
                if member.weight != Decimal::ZERO {
                    plan.push((member.id.clone(), Decimal::ZERO));
                }
            }
            continue;
        }

        let shares = equal_shares(total, members.len());
        for (member, share) in members.into_iter().zip(shares) {
            if member.weight != share {
                plan.push((member.id.clone(), share));
            }
        }
    }

    plan
}
