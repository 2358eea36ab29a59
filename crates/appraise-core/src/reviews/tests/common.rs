use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::reviews::domain::{
    Competency, CompetencyCategory, CompetencyDraft, CompetencyId, EmployeeId, Evaluation,
    EvaluationId, EvaluationKind, EvaluationStatus, ManagerialLevel, NewEvaluation, Objective,
    ObjectiveDraft, ObjectiveId, ObjectiveStatus, WeightSnapshot,
};
use crate::reviews::memory::{MemoryRepository, MemoryWeightConfigs};
use crate::reviews::repository::{RepositoryError, ReviewRepository, ScoreTotals};
use crate::reviews::service::ReviewService;

pub(super) fn dec(raw: &str) -> Decimal {
    raw.parse().expect("valid decimal literal")
}

pub(super) fn snapshot(
    objectives: u32,
    competencies: u32,
    core: u32,
    leadership: u32,
    functional: u32,
) -> WeightSnapshot {
    WeightSnapshot {
        objectives_pct: Decimal::from(objectives),
        competencies_pct: Decimal::from(competencies),
        core_pct: Decimal::from(core),
        leadership_pct: Decimal::from(leadership),
        functional_pct: Decimal::from(functional),
    }
}

/// Directly constructed objective for scoring-function tests; `index`
/// staggers creation stamps so ordering stays deterministic.
pub(super) fn objective(
    index: u32,
    target: Option<&str>,
    achieved: Option<&str>,
    weight: &str,
) -> Objective {
    let created_at = Utc::now() + Duration::seconds(i64::from(index));
    Objective {
        id: ObjectiveId(format!("fixture-obj-{index:03}")),
        evaluation: EvaluationId("fixture-eval".to_string()),
        title: format!("Objective {index}"),
        description: String::new(),
        target: target.map(dec),
        achieved: achieved.map(dec),
        weight: dec(weight),
        status: ObjectiveStatus::InProgress,
        created_at,
        updated_at: created_at,
    }
}

pub(super) fn competency(
    index: u32,
    category: CompetencyCategory,
    required_level: u8,
    actual_level: u8,
    weight: &str,
) -> Competency {
    let created_at = Utc::now() + Duration::seconds(i64::from(index));
    Competency {
        id: CompetencyId(format!("fixture-comp-{index:03}")),
        evaluation: EvaluationId("fixture-eval".to_string()),
        name: format!("Competency {index}"),
        category,
        required_level,
        actual_level,
        weight: dec(weight),
        description: String::new(),
        created_at,
        updated_at: created_at,
    }
}

pub(super) fn new_evaluation(level: ManagerialLevel) -> NewEvaluation {
    NewEvaluation {
        employee: EmployeeId("emp-104".to_string()),
        reviewer: None,
        managerial_level: level,
        period: "2026-Mid".to_string(),
        kind: EvaluationKind::Annual,
        status: EvaluationStatus::Draft,
    }
}

pub(super) fn objective_draft(target: Option<&str>, achieved: Option<&str>) -> ObjectiveDraft {
    ObjectiveDraft {
        title: "Ship onboarding revamp".to_string(),
        description: String::new(),
        target: target.map(dec),
        achieved: achieved.map(dec),
        status: ObjectiveStatus::InProgress,
    }
}

pub(super) fn competency_draft(category: CompetencyCategory, actual_level: u8) -> CompetencyDraft {
    CompetencyDraft {
        name: "Collaboration".to_string(),
        category,
        required_level: 4,
        actual_level,
        description: String::new(),
    }
}

pub(super) fn build_service() -> (
    ReviewService<MemoryRepository, MemoryWeightConfigs>,
    Arc<MemoryRepository>,
    Arc<MemoryWeightConfigs>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let configs = Arc::new(MemoryWeightConfigs::with_standard_table());
    let service = ReviewService::new(repository.clone(), configs.clone());
    (service, repository, configs)
}

/// Repository whose score settlement always reports a stale version, so
/// service tests can observe the concurrent-mutation path.
pub(super) struct StaleScoreRepository {
    pub(super) inner: MemoryRepository,
}

impl ReviewRepository for StaleScoreRepository {
    fn insert_evaluation(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        self.inner.insert_evaluation(evaluation)
    }

    fn fetch_evaluation(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        self.inner.fetch_evaluation(id)
    }

    fn update_scores(
        &self,
        _id: &EvaluationId,
        expected_version: u64,
        _totals: &ScoreTotals,
    ) -> Result<u64, RepositoryError> {
        Err(RepositoryError::VersionConflict {
            expected: expected_version,
            actual: expected_version + 1,
        })
    }

    fn insert_objective(&self, objective: Objective) -> Result<Objective, RepositoryError> {
        self.inner.insert_objective(objective)
    }

    fn update_objective(&self, objective: Objective) -> Result<(), RepositoryError> {
        self.inner.update_objective(objective)
    }

    fn delete_objective(&self, id: &ObjectiveId) -> Result<Objective, RepositoryError> {
        self.inner.delete_objective(id)
    }

    fn fetch_objective(&self, id: &ObjectiveId) -> Result<Option<Objective>, RepositoryError> {
        self.inner.fetch_objective(id)
    }

    fn objectives_for(&self, evaluation: &EvaluationId) -> Result<Vec<Objective>, RepositoryError> {
        self.inner.objectives_for(evaluation)
    }

    fn set_objective_weight(
        &self,
        id: &ObjectiveId,
        weight: Decimal,
    ) -> Result<(), RepositoryError> {
        self.inner.set_objective_weight(id, weight)
    }

    fn insert_competency(&self, competency: Competency) -> Result<Competency, RepositoryError> {
        self.inner.insert_competency(competency)
    }

    fn update_competency(&self, competency: Competency) -> Result<(), RepositoryError> {
        self.inner.update_competency(competency)
    }

    fn delete_competency(&self, id: &CompetencyId) -> Result<Competency, RepositoryError> {
        self.inner.delete_competency(id)
    }

    fn fetch_competency(&self, id: &CompetencyId) -> Result<Option<Competency>, RepositoryError> {
        self.inner.fetch_competency(id)
    }

    fn competencies_for(
        &self,
        evaluation: &EvaluationId,
    ) -> Result<Vec<Competency>, RepositoryError> {
        self.inner.competencies_for(evaluation)
    }

    fn set_competency_weight(
        &self,
        id: &CompetencyId,
        weight: Decimal,
    ) -> Result<(), RepositoryError> {
        self.inner.set_competency_weight(id, weight)
    }
}
