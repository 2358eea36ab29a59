use rust_decimal::Decimal;

use super::common::*;
use crate::reviews::scoring::objectives::{
    objective_score, objectives_block, validate_objectives,
};
use crate::reviews::scoring::ConstraintViolation;

#[test]
fn objective_score_is_ratio_times_weight() {
    let objective = objective(1, Some("100"), Some("50"), "100");

    assert_eq!(objective_score(&objective, true), dec("50.00"));
}

#[test]
fn objective_score_settles_half_cents_upward() {
    // 755.5 / 1000 * 10 = 7.555 -> 7.56
    let objective = objective(1, Some("1000"), Some("755.5"), "10");

    assert_eq!(objective_score(&objective, true), dec("7.56"));
}

#[test]
fn missing_target_scores_zero() {
    let objective = objective(1, None, Some("50"), "100");

    assert_eq!(objective_score(&objective, true), Decimal::ZERO);
}

#[test]
fn zero_or_negative_target_scores_zero() {
    let zero_target = objective(1, Some("0"), Some("50"), "100");
    let negative_target = objective(2, Some("-10"), Some("50"), "100");

    assert_eq!(objective_score(&zero_target, true), Decimal::ZERO);
    assert_eq!(objective_score(&negative_target, true), Decimal::ZERO);
}

#[test]
fn missing_achieved_scores_zero() {
    let objective = objective(1, Some("100"), None, "100");

    assert_eq!(objective_score(&objective, true), Decimal::ZERO);
}

#[test]
fn over_achievement_is_capped_at_full_weight() {
    let objective = objective(1, Some("100"), Some("150"), "50");

    assert_eq!(objective_score(&objective, true), dec("50.00"));
    assert_eq!(objective_score(&objective, false), dec("75.00"));
}

#[test]
fn negative_achievement_is_floored_at_zero_when_capped() {
    let objective = objective(1, Some("100"), Some("-25"), "50");

    assert_eq!(objective_score(&objective, true), Decimal::ZERO);
}

#[test]
fn block_subtotal_accumulates_before_settling() {
    // A lone 33.33-weight objective at half achievement: 16.665 -> 16.67.
    let weights = snapshot(60, 40, 20, 10, 10);
    let objectives = vec![objective(1, Some("100"), Some("50"), "33.33")];

    let block = objectives_block(&objectives, &weights, true);

    assert_eq!(block.subtotal, dec("16.67"));
}

#[test]
fn block_scales_subtotal_by_snapshot_share() {
    let weights = snapshot(60, 40, 20, 10, 10);
    let objectives = vec![objective(1, Some("100"), Some("50"), "100")];

    let block = objectives_block(&objectives, &weights, true);

    assert_eq!(block.subtotal, dec("50.00"));
    assert_eq!(block.weighted, dec("30.00"));
}

#[test]
fn bad_items_never_abort_the_aggregate() {
    let weights = snapshot(60, 40, 20, 10, 10);
    let objectives = vec![
        objective(1, Some("0"), Some("10"), "50"),
        objective(2, Some("100"), Some("100"), "50"),
    ];

    let block = objectives_block(&objectives, &weights, true);

    assert_eq!(block.subtotal, dec("50.00"));
    assert_eq!(block.weighted, dec("30.00"));
}

#[test]
fn zero_snapshot_degrades_block_to_zero() {
    let weights = snapshot(0, 0, 0, 0, 0);
    let objectives = vec![objective(1, Some("100"), Some("100"), "100")];

    let block = objectives_block(&objectives, &weights, true);

    assert_eq!(block.weighted, Decimal::ZERO);
}

#[test]
fn empty_objective_set_passes_validation() {
    assert!(validate_objectives(&[]).is_empty());
}

#[test]
fn drifted_weight_sum_is_flagged() {
    let objectives = vec![
        objective(1, Some("100"), None, "60"),
        objective(2, Some("100"), None, "60"),
    ];

    let violations = validate_objectives(&objectives);

    assert_eq!(
        violations,
        vec![ConstraintViolation::ObjectiveWeightSum {
            actual: dec("120")
        }]
    );
}

#[test]
fn non_positive_target_is_flagged() {
    let objectives = vec![
        objective(1, Some("0"), None, "50"),
        objective(2, Some("100"), None, "50"),
    ];

    let violations = validate_objectives(&objectives);

    assert_eq!(violations.len(), 1);
    assert!(matches!(
        violations[0],
        ConstraintViolation::NonPositiveTarget { .. }
    ));
}

#[test]
fn negative_weight_is_flagged() {
    let objectives = vec![
        objective(1, Some("100"), None, "120"),
        objective(2, Some("100"), None, "-20"),
    ];

    let violations = validate_objectives(&objectives);

    assert!(violations
        .iter()
        .any(|violation| matches!(violation, ConstraintViolation::NegativeObjectiveWeight { .. })));
}
