use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::Utc;
use rust_decimal::Decimal;

use super::domain::{
    Competency, CompetencyId, Evaluation, EvaluationId, ManagerialLevel, Objective, ObjectiveId,
    WeightConfiguration,
};
use super::repository::{RepositoryError, ReviewRepository, ScoreTotals, WeightConfigSource};

/// In-memory record store backing the CLI walkthrough and the test
/// suites. A single mutex serializes all access, which also satisfies
/// the single-writer-per-evaluation assumption.
#[derive(Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    evaluations: BTreeMap<EvaluationId, Evaluation>,
    objectives: BTreeMap<ObjectiveId, Objective>,
    competencies: BTreeMap<CompetencyId, Competency>,
}

impl ReviewRepository for MemoryRepository {
    fn insert_evaluation(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        if state.evaluations.contains_key(&evaluation.id) {
            return Err(RepositoryError::Conflict);
        }
        state
            .evaluations
            .insert(evaluation.id.clone(), evaluation.clone());
        Ok(evaluation)
    }

    fn fetch_evaluation(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.evaluations.get(id).cloned())
    }

    fn update_scores(
        &self,
        id: &EvaluationId,
        expected_version: u64,
        totals: &ScoreTotals,
    ) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let evaluation = state
            .evaluations
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        if evaluation.version != expected_version {
            return Err(RepositoryError::VersionConflict {
                expected: expected_version,
                actual: evaluation.version,
            });
        }
        evaluation.objectives_score = Some(totals.objectives);
        evaluation.competencies_score = Some(totals.competencies);
        evaluation.score = Some(totals.total);
        evaluation.version += 1;
        evaluation.updated_at = Utc::now();
        Ok(evaluation.version)
    }

    fn insert_objective(&self, objective: Objective) -> Result<Objective, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        if !state.evaluations.contains_key(&objective.evaluation) {
            return Err(RepositoryError::NotFound);
        }
        if state.objectives.contains_key(&objective.id) {
            return Err(RepositoryError::Conflict);
        }
        state
            .objectives
            .insert(objective.id.clone(), objective.clone());
        Ok(objective)
    }

    fn update_objective(&self, objective: Objective) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        if !state.objectives.contains_key(&objective.id) {
            return Err(RepositoryError::NotFound);
        }
        state.objectives.insert(objective.id.clone(), objective);
        Ok(())
    }

    fn delete_objective(&self, id: &ObjectiveId) -> Result<Objective, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        state.objectives.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn fetch_objective(&self, id: &ObjectiveId) -> Result<Option<Objective>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.objectives.get(id).cloned())
    }

    fn objectives_for(&self, evaluation: &EvaluationId) -> Result<Vec<Objective>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        let mut siblings: Vec<Objective> = state
            .objectives
            .values()
            .filter(|objective| &objective.evaluation == evaluation)
            .cloned()
            .collect();
        siblings.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(siblings)
    }

    fn set_objective_weight(
        &self,
        id: &ObjectiveId,
        weight: Decimal,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let objective = state.objectives.get_mut(id).ok_or(RepositoryError::NotFound)?;
        objective.weight = weight;
        objective.updated_at = Utc::now();
        Ok(())
    }

    fn insert_competency(&self, competency: Competency) -> Result<Competency, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        if !state.evaluations.contains_key(&competency.evaluation) {
            return Err(RepositoryError::NotFound);
        }
        if state.competencies.contains_key(&competency.id) {
            return Err(RepositoryError::Conflict);
        }
        state
            .competencies
            .insert(competency.id.clone(), competency.clone());
        Ok(competency)
    }

    fn update_competency(&self, competency: Competency) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        if !state.competencies.contains_key(&competency.id) {
            return Err(RepositoryError::NotFound);
        }
        state.competencies.insert(competency.id.clone(), competency);
        Ok(())
    }

    fn delete_competency(&self, id: &CompetencyId) -> Result<Competency, RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        state
            .competencies
            .remove(id)
            .ok_or(RepositoryError::NotFound)
    }

    fn fetch_competency(&self, id: &CompetencyId) -> Result<Option<Competency>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        Ok(state.competencies.get(id).cloned())
    }

    fn competencies_for(
        &self,
        evaluation: &EvaluationId,
    ) -> Result<Vec<Competency>, RepositoryError> {
        let state = self.state.lock().expect("repository mutex poisoned");
        let mut siblings: Vec<Competency> = state
            .competencies
            .values()
            .filter(|competency| &competency.evaluation == evaluation)
            .cloned()
            .collect();
        siblings.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(siblings)
    }

    fn set_competency_weight(
        &self,
        id: &CompetencyId,
        weight: Decimal,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().expect("repository mutex poisoned");
        let competency = state
            .competencies
            .get_mut(id)
            .ok_or(RepositoryError::NotFound)?;
        competency.weight = weight;
        competency.updated_at = Utc::now();
        Ok(())
    }
}

/// Mutable in-memory weight-configuration table. Tests edit it after an
/// evaluation is created to prove the snapshot does not move.
#[derive(Default)]
pub struct MemoryWeightConfigs {
    table: Mutex<BTreeMap<ManagerialLevel, WeightConfiguration>>,
}

impl MemoryWeightConfigs {
    /// Table seeded with the standard scheme for every level.
    pub fn with_standard_table() -> Self {
        let configs = Self::default();
        for level in [
            ManagerialLevel::IndividualContributor,
            ManagerialLevel::Supervisory,
            ManagerialLevel::MiddleManagement,
            ManagerialLevel::Executive,
        ] {
            configs.upsert(WeightConfiguration::standard(level));
        }
        configs
    }

    pub fn upsert(&self, configuration: WeightConfiguration) {
        let mut table = self.table.lock().expect("weight table mutex poisoned");
        table.insert(configuration.level, configuration);
    }

    pub fn remove(&self, level: ManagerialLevel) {
        let mut table = self.table.lock().expect("weight table mutex poisoned");
        table.remove(&level);
    }
}

impl WeightConfigSource for MemoryWeightConfigs {
    fn weights_for(
        &self,
        level: ManagerialLevel,
    ) -> Result<Option<WeightConfiguration>, RepositoryError> {
        let table = self.table.lock().expect("weight table mutex poisoned");
        Ok(table.get(&level).copied())
    }
}
