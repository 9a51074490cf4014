use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::catalog::CriterionCatalog;
use super::domain::{
    Criterion, EmployeeId, EmployeeProfile, EvaluationDraft, EvaluationItem, EvaluationPeriod,
    Role, ValidationError,
};
use super::repository::{Evaluation, EvaluationRepository, RepositoryError};
use super::scoring::Scorecard;

/// Applicable criteria for a new evaluation, resolved from the employee's
/// department and position so callers can render a pre-filled form.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationMetadata {
    pub behavioral: Vec<Criterion>,
    pub technical: Vec<Criterion>,
}

/// One employee's evaluations for a year, month ascending, with the plain
/// mean of the final scores (zero when the year is empty).
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationHistory {
    pub evaluations: Vec<Evaluation>,
    pub annual_average: f64,
}

/// Service composing the criterion catalog and the evaluation store.
pub struct EvaluationService<C, R> {
    catalog: Arc<C>,
    repository: Arc<R>,
}

impl<C, R> EvaluationService<C, R>
where
    C: CriterionCatalog + 'static,
    R: EvaluationRepository + 'static,
{
    pub fn new(catalog: Arc<C>, repository: Arc<R>) -> Self {
        Self {
            catalog,
            repository,
        }
    }

    /// Resolve the criteria applicable to an employee: every behavioral
    /// criterion plus the technical rows scoped to their department and
    /// position (exact match or the null-position fallback).
    pub fn metadata(&self, profile: &EmployeeProfile) -> EvaluationMetadata {
        EvaluationMetadata {
            behavioral: self.catalog.behavioral(),
            technical: self
                .catalog
                .technical(profile.department.as_ref(), &profile.position),
        }
    }

    /// Record a new evaluation. Scores are recomputed here; a record already
    /// present for the `(employee, period)` key surfaces as a duplicate.
    pub fn record(&self, draft: EvaluationDraft) -> Result<Evaluation, EvaluationServiceError> {
        let evaluation = self.build(draft)?;

        let stored = match self.repository.insert(evaluation) {
            Ok(stored) => stored,
            Err(RepositoryError::Conflict) => return Err(EvaluationServiceError::Duplicate),
            Err(other) => return Err(other.into()),
        };

        info!(
            employee = %stored.employee.0,
            month = stored.period.month,
            year = stored.period.year,
            final_score = stored.scorecard.final_score,
            grade = stored.scorecard.grade.label(),
            "evaluation recorded"
        );
        Ok(stored)
    }

    /// Replace a recorded evaluation wholesale. The previous item set is
    /// discarded entirely and the scores come from the new items only.
    pub fn amend(
        &self,
        role: Role,
        draft: EvaluationDraft,
    ) -> Result<Evaluation, EvaluationServiceError> {
        if !role.can_amend() {
            return Err(EvaluationServiceError::InsufficientRole {
                role,
                action: "amend",
            });
        }

        let evaluation = self.build(draft)?;
        match self.repository.replace(evaluation.clone()) {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(EvaluationServiceError::NotRecorded),
            Err(other) => return Err(other.into()),
        }

        info!(
            employee = %evaluation.employee.0,
            month = evaluation.period.month,
            year = evaluation.period.year,
            items = evaluation.items.len(),
            final_score = evaluation.scorecard.final_score,
            "evaluation amended"
        );
        Ok(evaluation)
    }

    /// Remove an evaluation and its items.
    pub fn delete(
        &self,
        role: Role,
        employee: &EmployeeId,
        period: EvaluationPeriod,
    ) -> Result<(), EvaluationServiceError> {
        if !role.can_delete() {
            return Err(EvaluationServiceError::InsufficientRole {
                role,
                action: "delete",
            });
        }
        let period = period.validate()?;

        match self.repository.delete(employee, period) {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(EvaluationServiceError::NotRecorded),
            Err(other) => return Err(other.into()),
        }

        info!(
            employee = %employee.0,
            month = period.month,
            year = period.year,
            "evaluation deleted"
        );
        Ok(())
    }

    pub fn find(
        &self,
        employee: &EmployeeId,
        period: EvaluationPeriod,
    ) -> Result<Option<Evaluation>, EvaluationServiceError> {
        let period = period.validate()?;
        Ok(self.repository.find(employee, period)?)
    }

    /// Evaluation history for a year, month ascending, plus the annual
    /// average of the stored final scores.
    pub fn history(
        &self,
        employee: &EmployeeId,
        year: i32,
    ) -> Result<EvaluationHistory, EvaluationServiceError> {
        let mut evaluations = self.repository.list_for_year(employee, year)?;
        evaluations.sort_by_key(|evaluation| evaluation.period.month);

        let annual_average = if evaluations.is_empty() {
            0.0
        } else {
            let sum: f64 = evaluations
                .iter()
                .map(|evaluation| evaluation.scorecard.final_score)
                .sum();
            sum / evaluations.len() as f64
        };

        Ok(EvaluationHistory {
            evaluations,
            annual_average,
        })
    }

    /// Validate a draft against the catalog and compute its scorecard.
    fn build(&self, draft: EvaluationDraft) -> Result<Evaluation, EvaluationServiceError> {
        let period = draft.period.validate()?;
        if draft.items.is_empty() {
            return Err(ValidationError::EmptyItemSet.into());
        }

        let mut seen: BTreeSet<_> = BTreeSet::new();
        let mut behavioral: Vec<EvaluationItem> = Vec::new();
        let mut technical: Vec<EvaluationItem> = Vec::new();

        for item in draft.items {
            if !seen.insert(item.criterion.clone()) {
                return Err(ValidationError::DuplicateCriterion {
                    criterion: item.criterion,
                }
                .into());
            }

            let cataloged = self
                .catalog
                .find(&item.criterion)
                .ok_or_else(|| EvaluationServiceError::CriterionNotFound(item.criterion.clone()))?;

            if cataloged.kind != item.kind {
                return Err(ValidationError::KindMismatch {
                    criterion: item.criterion,
                    declared: item.kind,
                    stored: cataloged.kind,
                }
                .into());
            }
            if !(1..=5).contains(&item.score) {
                return Err(ValidationError::ScoreOutOfRange {
                    criterion: item.criterion,
                    score: item.score,
                }
                .into());
            }
            if item.weight > 100 {
                return Err(ValidationError::WeightOutOfRange {
                    criterion: item.criterion,
                    weight: item.weight,
                }
                .into());
            }

            let validated = EvaluationItem {
                criterion: item.criterion,
                kind: cataloged.kind,
                target: item.target,
                actual: item.actual,
                weight: item.weight,
                score: item.score,
                comment: item.comment,
            };
            match cataloged.kind {
                super::domain::CriterionKind::Behavioral => behavioral.push(validated),
                super::domain::CriterionKind::Technical => technical.push(validated),
            }
        }

        let scorecard = Scorecard::compute(&behavioral, &technical);

        let mut items = behavioral;
        items.append(&mut technical);

        Ok(Evaluation {
            employee: draft.employee,
            appraiser: draft.appraiser,
            period,
            items,
            feedback: draft.feedback,
            scorecard,
        })
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("an evaluation already exists for this employee and period")]
    Duplicate,
    #[error("criterion {0:?} not found in the catalog")]
    CriterionNotFound(super::domain::CriterionId),
    #[error("no evaluation recorded for this employee and period")]
    NotRecorded,
    #[error("role {} may not {action} evaluations", .role.label())]
    InsufficientRole { role: Role, action: &'static str },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
