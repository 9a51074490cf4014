use serde::{Deserialize, Serialize};

use super::domain::{EmployeeId, EvaluationItem, EvaluationPeriod};
use super::scoring::Scorecard;

/// A recorded evaluation: the full item set plus the server-computed scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub employee: EmployeeId,
    pub appraiser: EmployeeId,
    pub period: EvaluationPeriod,
    pub items: Vec<EvaluationItem>,
    pub feedback: Option<String>,
    pub scorecard: Scorecard,
}

/// Storage abstraction so the service module can be exercised in isolation.
///
/// `insert` must be a conditional insert on the `(employee, period)` key and
/// `replace` must swap the whole record (including its item set)
/// all-or-nothing: old and new items never coexist, and a failed replace
/// leaves the previous record intact. Races on the key are serialized by the
/// store's uniqueness constraint, not by engine-side locking.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError>;
    fn replace(&self, evaluation: Evaluation) -> Result<(), RepositoryError>;
    fn delete(&self, employee: &EmployeeId, period: EvaluationPeriod)
        -> Result<(), RepositoryError>;
    fn find(
        &self,
        employee: &EmployeeId,
        period: EvaluationPeriod,
    ) -> Result<Option<Evaluation>, RepositoryError>;
    /// Every evaluation for the employee in the given year, any order.
    fn list_for_year(
        &self,
        employee: &EmployeeId,
        year: i32,
    ) -> Result<Vec<Evaluation>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
