use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for review cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Identifier wrapper for objectives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectiveId(pub String);

/// Identifier wrapper for competencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompetencyId(pub String);

/// Reference to the reviewed employee, owned by the excluded HR directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Reference to the reviewing manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewerId(pub String);

/// Employee classification that selects which weight configuration applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ManagerialLevel {
    IndividualContributor,
    Supervisory,
    MiddleManagement,
    Executive,
}

impl ManagerialLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ManagerialLevel::IndividualContributor => "individual_contributor",
            ManagerialLevel::Supervisory => "supervisory",
            ManagerialLevel::MiddleManagement => "middle_management",
            ManagerialLevel::Executive => "executive",
        }
    }
}

/// Cadence of a review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationKind {
    Annual,
    Quarterly,
    Optional,
    SelfReview,
}

/// Lifecycle of a review cycle. `EmployeeReview` is the self-evaluation
/// stage; its permission rules live with the API layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaluationStatus {
    Draft,
    PendingHodApproval,
    PendingHrApproval,
    EmployeeReview,
    Approved,
    Rejected,
    Completed,
}

impl EvaluationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStatus::Draft => "draft",
            EvaluationStatus::PendingHodApproval => "pending_hod_approval",
            EvaluationStatus::PendingHrApproval => "pending_hr_approval",
            EvaluationStatus::EmployeeReview => "employee_review",
            EvaluationStatus::Approved => "approved",
            EvaluationStatus::Rejected => "rejected",
            EvaluationStatus::Completed => "completed",
        }
    }
}

/// Progress state of a single objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Competency grouping. Each category holds its own slice of the
/// competency weight budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompetencyCategory {
    Core,
    Leadership,
    Functional,
}

impl CompetencyCategory {
    pub const ALL: [CompetencyCategory; 3] = [
        CompetencyCategory::Core,
        CompetencyCategory::Leadership,
        CompetencyCategory::Functional,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CompetencyCategory::Core => "core",
            CompetencyCategory::Leadership => "leadership",
            CompetencyCategory::Functional => "functional",
        }
    }
}

/// Per-level weighting scheme, maintained by HR. Mutable; edits only
/// affect evaluations created afterwards (see [`WeightSnapshot`]).
///
/// `objective_weight` and `competency_weight` split the overall score;
/// the three category weights split the competency side and may sum to
/// less than 100 when a category is deliberately zero-weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightConfiguration {
    pub level: ManagerialLevel,
    pub objective_weight: u8,
    pub competency_weight: u8,
    pub core_weight: u8,
    pub leadership_weight: u8,
    pub functional_weight: u8,
}

impl WeightConfiguration {
    /// The weighting scheme HR seeds for a fresh install. Executive
    /// reviews carry no functional competencies.
    pub fn standard(level: ManagerialLevel) -> Self {
        match level {
            ManagerialLevel::IndividualContributor => Self {
                level,
                objective_weight: 60,
                competency_weight: 40,
                core_weight: 20,
                leadership_weight: 10,
                functional_weight: 10,
            },
            ManagerialLevel::Supervisory => Self {
                level,
                objective_weight: 50,
                competency_weight: 50,
                core_weight: 20,
                leadership_weight: 15,
                functional_weight: 15,
            },
            ManagerialLevel::MiddleManagement => Self {
                level,
                objective_weight: 40,
                competency_weight: 60,
                core_weight: 20,
                leadership_weight: 25,
                functional_weight: 15,
            },
            ManagerialLevel::Executive => Self {
                level,
                objective_weight: 30,
                competency_weight: 70,
                core_weight: 30,
                leadership_weight: 40,
                functional_weight: 0,
            },
        }
    }
}

/// Weight percentages frozen onto an evaluation at creation time.
///
/// Copied once from the [`WeightConfiguration`] matching the employee's
/// managerial level and never re-read, so later configuration edits do
/// not alter historical scores. A missing configuration yields the zero
/// snapshot and all downstream scores degrade to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    pub objectives_pct: Decimal,
    pub competencies_pct: Decimal,
    pub core_pct: Decimal,
    pub leadership_pct: Decimal,
    pub functional_pct: Decimal,
}

impl WeightSnapshot {
    pub fn zero() -> Self {
        Self {
            objectives_pct: Decimal::ZERO,
            competencies_pct: Decimal::ZERO,
            core_pct: Decimal::ZERO,
            leadership_pct: Decimal::ZERO,
            functional_pct: Decimal::ZERO,
        }
    }

    pub fn from_configuration(configuration: &WeightConfiguration) -> Self {
        Self {
            objectives_pct: Decimal::from(configuration.objective_weight),
            competencies_pct: Decimal::from(configuration.competency_weight),
            core_pct: Decimal::from(configuration.core_weight),
            leadership_pct: Decimal::from(configuration.leadership_weight),
            functional_pct: Decimal::from(configuration.functional_weight),
        }
    }

    /// The competency-budget slice held by one category.
    pub fn category_pct(&self, category: CompetencyCategory) -> Decimal {
        match category {
            CompetencyCategory::Core => self.core_pct,
            CompetencyCategory::Leadership => self.leadership_pct,
            CompetencyCategory::Functional => self.functional_pct,
        }
    }
}

/// One review cycle for one employee.
///
/// `objectives_score`, `competencies_score`, and `score` are cached
/// results, refreshed by the service after every child mutation; `None`
/// means no pass has been persisted yet. `version` guards the cached
/// fields against concurrent redistribution passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub employee: EmployeeId,
    pub reviewer: Option<ReviewerId>,
    pub managerial_level: ManagerialLevel,
    pub period: String,
    pub kind: EvaluationKind,
    pub status: EvaluationStatus,
    pub weights: WeightSnapshot,
    pub objectives_score: Option<Decimal>,
    pub competencies_score: Option<Decimal>,
    pub score: Option<Decimal>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation parameters for a review cycle. The caller supplies the
/// managerial level; the employee directory is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvaluation {
    pub employee: EmployeeId,
    pub reviewer: Option<ReviewerId>,
    pub managerial_level: ManagerialLevel,
    pub period: String,
    pub kind: EvaluationKind,
    pub status: EvaluationStatus,
}

/// A goal tracked under one evaluation. `weight` is never client-set;
/// the redistribution pass keeps all sibling weights summing to 100.00.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub id: ObjectiveId,
    pub evaluation: EvaluationId,
    pub title: String,
    pub description: String,
    pub target: Option<Decimal>,
    pub achieved: Option<Decimal>,
    pub weight: Decimal,
    pub status: ObjectiveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-settable objective fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveDraft {
    pub title: String,
    pub description: String,
    pub target: Option<Decimal>,
    pub achieved: Option<Decimal>,
    pub status: ObjectiveStatus,
}

/// A skill rating under one evaluation. Weight is derived per category:
/// the category's frozen share split evenly among its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competency {
    pub id: CompetencyId,
    pub evaluation: EvaluationId,
    pub name: String,
    pub category: CompetencyCategory,
    pub required_level: u8,
    pub actual_level: u8,
    pub weight: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-settable competency fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyDraft {
    pub name: String,
    pub category: CompetencyCategory,
    pub required_level: u8,
    pub actual_level: u8,
    pub description: String,
}

/// Read-only projection of an evaluation's cached score fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub evaluation: EvaluationId,
    pub objectives_score: Decimal,
    pub competencies_score: Decimal,
    pub score: Decimal,
}
