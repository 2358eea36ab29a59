//! Performance-review scoring engine.
//!
//! Owns the rules that keep an evaluation's numbers self-consistent: the
//! weight snapshot frozen at creation, equal-share weight redistribution
//! across sibling objectives and per-category competencies, the
//! two-stage weighted scoring formula, and the redistribute-then-rescore
//! chain that runs after every child mutation. Storage is abstracted
//! behind [`ReviewRepository`] so the engine can run against the bundled
//! in-memory store or a real database adapter.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Competency, CompetencyCategory, CompetencyDraft, CompetencyId, EmployeeId, Evaluation,
    EvaluationId, EvaluationKind, EvaluationStatus, ManagerialLevel, NewEvaluation, Objective,
    ObjectiveDraft, ObjectiveId, ObjectiveStatus, ReviewerId, ScoreCard, WeightConfiguration,
    WeightSnapshot,
};
pub use memory::{MemoryRepository, MemoryWeightConfigs};
pub use repository::{RepositoryError, ReviewRepository, ScoreTotals, WeightConfigSource};
pub use scoring::ConstraintViolation;
pub use service::{ReviewService, ReviewServiceError};
