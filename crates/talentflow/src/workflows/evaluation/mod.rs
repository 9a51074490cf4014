//! Performance evaluation scoring and lifecycle management.
//!
//! An appraiser rates an employee against catalog criteria for one
//! month/year period; the engine recomputes the behavioral average, the
//! weighted technical sum, and the banded final score on every write, and
//! enforces one evaluation per employee per period.

pub mod catalog;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CriterionCatalog, StandardCriterionCatalog};
pub use domain::{
    Criterion, CriterionId, CriterionKind, DepartmentId, EmployeeId, EmployeeProfile,
    EvaluationDraft, EvaluationItem, EvaluationPeriod, ItemDraft, Role, ValidationError,
};
pub use repository::{Evaluation, EvaluationRepository, RepositoryError};
pub use router::{evaluation_router, EvaluationView};
pub use scoring::{score_for_achievement, Grade, Scorecard, BEHAVIOR_WEIGHT, TECHNICAL_WEIGHT};
pub use service::{
    EvaluationHistory, EvaluationMetadata, EvaluationService, EvaluationServiceError,
};
