use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{
    Competency, CompetencyId, Evaluation, EvaluationId, ManagerialLevel, Objective, ObjectiveId,
    WeightConfiguration,
};

/// The three cached score fields written back in one settlement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreTotals {
    pub objectives: Decimal,
    pub competencies: Decimal,
    pub total: Decimal,
}

/// Storage abstraction for evaluations and their child records, so the
/// service can be exercised against in-memory fakes.
///
/// Child listings are ordered by creation time, then identifier, which
/// makes redistribution output deterministic. `set_objective_weight` and
/// `set_competency_weight` are the redistribution write path: plain field
/// updates that no recalculation hook observes. `update_scores` is a
/// compare-and-swap on the evaluation's version so concurrent
/// redistribution passes cannot silently overwrite each other.
pub trait ReviewRepository: Send + Sync {
    fn insert_evaluation(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError>;
    fn fetch_evaluation(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError>;
    /// Persist the cached scores, returning the new version. Fails with
    /// [`RepositoryError::VersionConflict`] when `expected_version` is stale.
    fn update_scores(
        &self,
        id: &EvaluationId,
        expected_version: u64,
        totals: &ScoreTotals,
    ) -> Result<u64, RepositoryError>;

    fn insert_objective(&self, objective: Objective) -> Result<Objective, RepositoryError>;
    fn update_objective(&self, objective: Objective) -> Result<(), RepositoryError>;
    /// Remove and return the objective so callers can reach its evaluation.
    fn delete_objective(&self, id: &ObjectiveId) -> Result<Objective, RepositoryError>;
    fn fetch_objective(&self, id: &ObjectiveId) -> Result<Option<Objective>, RepositoryError>;
    fn objectives_for(&self, evaluation: &EvaluationId) -> Result<Vec<Objective>, RepositoryError>;
    fn set_objective_weight(&self, id: &ObjectiveId, weight: Decimal)
        -> Result<(), RepositoryError>;

    fn insert_competency(&self, competency: Competency) -> Result<Competency, RepositoryError>;
    fn update_competency(&self, competency: Competency) -> Result<(), RepositoryError>;
    fn delete_competency(&self, id: &CompetencyId) -> Result<Competency, RepositoryError>;
    fn fetch_competency(&self, id: &CompetencyId) -> Result<Option<Competency>, RepositoryError>;
    fn competencies_for(
        &self,
        evaluation: &EvaluationId,
    ) -> Result<Vec<Competency>, RepositoryError>;
    fn set_competency_weight(
        &self,
        id: &CompetencyId,
        weight: Decimal,
    ) -> Result<(), RepositoryError>;
}

/// Lookup for the per-level weighting scheme, read once per evaluation
/// at creation time.
pub trait WeightConfigSource: Send + Sync {
    fn weights_for(
        &self,
        level: ManagerialLevel,
    ) -> Result<Option<WeightConfiguration>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("evaluation version {actual} does not match expected {expected}")]
    VersionConflict { expected: u64, actual: u64 },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
