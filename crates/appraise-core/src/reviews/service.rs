use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::domain::{
    Competency, CompetencyDraft, CompetencyId, Evaluation, EvaluationId, NewEvaluation, Objective,
    ObjectiveDraft, ObjectiveId, ScoreCard, WeightSnapshot,
};
use super::repository::{RepositoryError, ReviewRepository, WeightConfigSource};
use super::scoring::{
    self, competencies::validate_competencies, objectives::validate_objectives,
    weights::competency_weight_plan, weights::objective_weight_plan, ConstraintViolation,
};

/// Service composing the weight snapshot, redistribution, and scoring
/// passes over a record store.
///
/// Every child mutation runs the same chain the mutation's transaction
/// would: redistribute the affected sibling group, then recompute and
/// persist the evaluation's cached scores. The chain is invoked
/// explicitly here rather than through save-time hooks, so each step is
/// visible and testable on its own.
pub struct ReviewService<R, W> {
    repository: Arc<R>,
    weight_configs: Arc<W>,
    cap_overachievement: bool,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static OBJECTIVE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static COMPETENCY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

fn next_objective_id() -> ObjectiveId {
    let id = OBJECTIVE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ObjectiveId(format!("obj-{id:06}"))
}

fn next_competency_id() -> CompetencyId {
    let id = COMPETENCY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CompetencyId(format!("comp-{id:06}"))
}

impl<R, W> ReviewService<R, W>
where
    R: ReviewRepository + 'static,
    W: WeightConfigSource + 'static,
{
    pub fn new(repository: Arc<R>, weight_configs: Arc<W>) -> Self {
        Self {
            repository,
            weight_configs,
            cap_overachievement: true,
        }
    }

    /// Let over-achievement ratios exceed 1.0 instead of clamping.
    pub fn with_uncapped_ratios(mut self) -> Self {
        self.cap_overachievement = false;
        self
    }

    /// Open a review cycle, freezing the weight snapshot for the
    /// employee's managerial level. A missing configuration is not an
    /// error: the snapshot degrades to zero and so do all scores.
    pub fn create_evaluation(
        &self,
        draft: NewEvaluation,
    ) -> Result<Evaluation, ReviewServiceError> {
        let weights = match self.weight_configs.weights_for(draft.managerial_level)? {
            Some(configuration) => WeightSnapshot::from_configuration(&configuration),
            None => {
                info!(
                    level = draft.managerial_level.label(),
                    "no weight configuration for level; freezing zero snapshot"
                );
                WeightSnapshot::zero()
            }
        };

        let now = Utc::now();
        let evaluation = Evaluation {
            id: next_evaluation_id(),
            employee: draft.employee,
            reviewer: draft.reviewer,
            managerial_level: draft.managerial_level,
            period: draft.period,
            kind: draft.kind,
            status: draft.status,
            weights,
            objectives_score: None,
            competencies_score: None,
            score: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert_evaluation(evaluation)?;
        Ok(stored)
    }

    /// Attach an objective and run the objective chain. The stored weight
    /// is set by redistribution, never by the caller.
    pub fn add_objective(
        &self,
        evaluation_id: &EvaluationId,
        draft: ObjectiveDraft,
    ) -> Result<Objective, ReviewServiceError> {
        let evaluation = self.require_evaluation(evaluation_id)?;

        let now = Utc::now();
        let objective = Objective {
            id: next_objective_id(),
            evaluation: evaluation.id.clone(),
            title: draft.title,
            description: draft.description,
            target: draft.target,
            achieved: draft.achieved,
            weight: Decimal::ZERO,
            status: draft.status,
            created_at: now,
            updated_at: now,
        };
        let stored = self.repository.insert_objective(objective)?;

        self.objective_chain(&evaluation)?;
        self.refetch_objective(&stored.id)
    }

    /// Replace an objective's client-settable fields and re-run the
    /// chain. The weight field is left to redistribution.
    pub fn update_objective(
        &self,
        objective_id: &ObjectiveId,
        draft: ObjectiveDraft,
    ) -> Result<Objective, ReviewServiceError> {
        let mut objective = self
            .repository
            .fetch_objective(objective_id)?
            .ok_or(RepositoryError::NotFound)?;
        let evaluation = self.require_evaluation(&objective.evaluation)?;

        objective.title = draft.title;
        objective.description = draft.description;
        objective.target = draft.target;
        objective.achieved = draft.achieved;
        objective.status = draft.status;
        objective.updated_at = Utc::now();
        self.repository.update_objective(objective)?;

        self.objective_chain(&evaluation)?;
        self.refetch_objective(objective_id)
    }

    /// Detach an objective; the survivors re-split the full 100.00.
    pub fn delete_objective(
        &self,
        objective_id: &ObjectiveId,
    ) -> Result<(), ReviewServiceError> {
        let removed = self.repository.delete_objective(objective_id)?;
        let evaluation = self.require_evaluation(&removed.evaluation)?;
        self.objective_chain(&evaluation)?;
        Ok(())
    }

    /// Attach a competency and run the competency chain.
    pub fn add_competency(
        &self,
        evaluation_id: &EvaluationId,
        draft: CompetencyDraft,
    ) -> Result<Competency, ReviewServiceError> {
        let evaluation = self.require_evaluation(evaluation_id)?;

        let now = Utc::now();
        let competency = Competency {
            id: next_competency_id(),
            evaluation: evaluation.id.clone(),
            name: draft.name,
            category: draft.category,
            required_level: draft.required_level,
            actual_level: draft.actual_level,
            weight: Decimal::ZERO,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };
        let stored = self.repository.insert_competency(competency)?;

        self.competency_chain(&evaluation)?;
        self.refetch_competency(&stored.id)
    }

    /// Replace a competency's client-settable fields and re-run the
    /// chain. Changing the category moves the item between weight pools.
    pub fn update_competency(
        &self,
        competency_id: &CompetencyId,
        draft: CompetencyDraft,
    ) -> Result<Competency, ReviewServiceError> {
        let mut competency = self
            .repository
            .fetch_competency(competency_id)?
            .ok_or(RepositoryError::NotFound)?;
        let evaluation = self.require_evaluation(&competency.evaluation)?;

        competency.name = draft.name;
        competency.category = draft.category;
        competency.required_level = draft.required_level;
        competency.actual_level = draft.actual_level;
        competency.description = draft.description;
        competency.updated_at = Utc::now();
        self.repository.update_competency(competency)?;

        self.competency_chain(&evaluation)?;
        self.refetch_competency(competency_id)
    }

    /// Detach a competency; its category re-splits the frozen share.
    pub fn delete_competency(
        &self,
        competency_id: &CompetencyId,
    ) -> Result<(), ReviewServiceError> {
        let removed = self.repository.delete_competency(competency_id)?;
        let evaluation = self.require_evaluation(&removed.evaluation)?;
        self.competency_chain(&evaluation)?;
        Ok(())
    }

    /// Read-only projection of the cached score fields. Unscored
    /// evaluations project zeros rather than erroring.
    pub fn score(&self, evaluation_id: &EvaluationId) -> Result<ScoreCard, ReviewServiceError> {
        let evaluation = self.require_evaluation(evaluation_id)?;
        Ok(ScoreCard {
            evaluation: evaluation.id.clone(),
            objectives_score: evaluation.objectives_score.unwrap_or(Decimal::ZERO),
            competencies_score: evaluation.competencies_score.unwrap_or(Decimal::ZERO),
            score: evaluation.score.unwrap_or(Decimal::ZERO),
        })
    }

    /// Full redistribute-and-rescore pass over both sibling groups.
    /// Used to backfill cached scores and by callers retrying after a
    /// version conflict.
    pub fn recalculate(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<ScoreCard, ReviewServiceError> {
        let evaluation = self.require_evaluation(evaluation_id)?;
        self.redistribute_objectives(&evaluation)?;
        self.redistribute_competencies(&evaluation)?;
        self.settle_scores(&evaluation)
    }

    /// Advisory readiness checks for the objective set; never mutates.
    pub fn validate_objectives(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<Vec<ConstraintViolation>, ReviewServiceError> {
        let evaluation = self.require_evaluation(evaluation_id)?;
        let objectives = self.repository.objectives_for(&evaluation.id)?;
        Ok(validate_objectives(&objectives))
    }

    /// Advisory readiness checks for the competency set; never mutates.
    pub fn validate_competencies(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<Vec<ConstraintViolation>, ReviewServiceError> {
        let evaluation = self.require_evaluation(evaluation_id)?;
        let competencies = self.repository.competencies_for(&evaluation.id)?;
        Ok(validate_competencies(&competencies, &evaluation.weights))
    }

    fn require_evaluation(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<Evaluation, ReviewServiceError> {
        Ok(self
            .repository
            .fetch_evaluation(evaluation_id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    fn objective_chain(&self, evaluation: &Evaluation) -> Result<(), ReviewServiceError> {
        self.redistribute_objectives(evaluation)?;
        self.settle_scores(evaluation)?;
        Ok(())
    }

    fn competency_chain(&self, evaluation: &Evaluation) -> Result<(), ReviewServiceError> {
        self.redistribute_competencies(evaluation)?;
        self.settle_scores(evaluation)?;
        Ok(())
    }

    fn redistribute_objectives(&self, evaluation: &Evaluation) -> Result<(), ReviewServiceError> {
        let siblings = self.repository.objectives_for(&evaluation.id)?;
        let plan = objective_weight_plan(&siblings);
        if plan.is_empty() {
            return Ok(());
        }
        debug!(
            evaluation = %evaluation.id.0,
            updates = plan.len(),
            "redistributing objective weights"
        );
        for (id, weight) in plan {
            self.repository.set_objective_weight(&id, weight)?;
        }
        Ok(())
    }

    fn redistribute_competencies(&self, evaluation: &Evaluation) -> Result<(), ReviewServiceError> {
        let siblings = self.repository.competencies_for(&evaluation.id)?;
        let plan = competency_weight_plan(&siblings, &evaluation.weights);
        if plan.is_empty() {
            return Ok(());
        }
        debug!(
            evaluation = %evaluation.id.0,
            updates = plan.len(),
            "redistributing competency weights"
        );
        for (id, weight) in plan {
            self.repository.set_competency_weight(&id, weight)?;
        }
        Ok(())
    }

    /// Recompute both blocks from the freshly redistributed children and
    /// persist the totals under the version read at chain start. A stale
    /// version means another writer settled in between; the caller
    /// retries the whole mutation.
    fn settle_scores(&self, evaluation: &Evaluation) -> Result<ScoreCard, ReviewServiceError> {
        let objectives = self.repository.objectives_for(&evaluation.id)?;
        let competencies = self.repository.competencies_for(&evaluation.id)?;
        let totals = scoring::evaluation_totals(
            &objectives,
            &competencies,
            &evaluation.weights,
            self.cap_overachievement,
        );

        match self
            .repository
            .update_scores(&evaluation.id, evaluation.version, &totals)
        {
            Ok(_) => Ok(ScoreCard {
                evaluation: evaluation.id.clone(),
                objectives_score: totals.objectives,
                competencies_score: totals.competencies,
                score: totals.total,
            }),
            Err(RepositoryError::VersionConflict { .. }) => {
                Err(ReviewServiceError::ConcurrentMutation {
                    evaluation: evaluation.id.clone(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn refetch_objective(&self, id: &ObjectiveId) -> Result<Objective, ReviewServiceError> {
        Ok(self
            .repository
            .fetch_objective(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    fn refetch_competency(&self, id: &CompetencyId) -> Result<Competency, ReviewServiceError> {
        Ok(self
            .repository
            .fetch_competency(id)?
            .ok_or(RepositoryError::NotFound)?)
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("evaluation {} was mutated concurrently; retry the operation", evaluation.0)]
    ConcurrentMutation { evaluation: EvaluationId },
}
