use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::catalog::CategoryCatalog;
use super::domain::{ApplicantId, AssessmentCategory, AssessmentResult, CategoryId};
use super::repository::{ResultStore, ResultStoreError};
use super::sequencer;
use super::session::{CompletedAttempt, TestSession};

/// Where the applicant stands in the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssessmentProgress {
    pub completed: usize,
    pub total: usize,
}

impl AssessmentProgress {
    pub fn is_finished(self) -> bool {
        self.completed >= self.total
    }
}

/// Outcome of a submission. `created` is `false` when a result already
/// existed and the new answers were discarded — the applicant sees the same
/// continuation either way.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub created: bool,
    pub next: Option<AssessmentCategory>,
}

/// Service composing the category catalog and the result store.
pub struct AssessmentService<C, R> {
    catalog: Arc<C>,
    results: Arc<R>,
}

impl<C, R> AssessmentService<C, R>
where
    C: CategoryCatalog + 'static,
    R: ResultStore + 'static,
{
    pub fn new(catalog: Arc<C>, results: Arc<R>) -> Self {
        Self { catalog, results }
    }

    /// The category the applicant must take next, if any.
    pub fn next_category(
        &self,
        applicant: &ApplicantId,
    ) -> Result<Option<AssessmentCategory>, AssessmentServiceError> {
        Ok(sequencer::next_category(
            self.catalog.as_ref(),
            self.results.as_ref(),
            applicant,
        )?)
    }

    pub fn progress(
        &self,
        applicant: &ApplicantId,
    ) -> Result<AssessmentProgress, AssessmentServiceError> {
        let total = self.catalog.ordered().len();
        let completed = self.results.completed_categories(applicant)?.len();
        Ok(AssessmentProgress { completed, total })
    }

    /// Start a timed attempt. A category that already has a result is
    /// refused before the clock starts — re-entry never restarts a timer.
    pub fn open_category(
        &self,
        applicant: ApplicantId,
        category_id: &CategoryId,
        now: DateTime<Utc>,
    ) -> Result<TestSession, AssessmentServiceError> {
        let category = self
            .catalog
            .category(category_id)
            .ok_or_else(|| AssessmentServiceError::CategoryNotFound(category_id.clone()))?;

        if self.results.has_result(&applicant, category_id)? {
            return Err(AssessmentServiceError::AlreadyCompleted(
                category_id.clone(),
            ));
        }

        info!(
            applicant = %applicant.0,
            category = %category.id.0,
            time_limit_seconds = category.time_limit_seconds,
            "assessment session opened"
        );
        Ok(TestSession::begin(applicant, category, now))
    }

    /// Persist a finished attempt at most once and report what comes next.
    /// A conflict is a defined no-op: the stored answers win, `created` is
    /// `false`, and the applicant is routed onward as usual.
    pub fn submit(
        &self,
        attempt: CompletedAttempt,
    ) -> Result<SubmissionOutcome, AssessmentServiceError> {
        let CompletedAttempt {
            applicant,
            category,
            answers,
            close_reason,
        } = attempt;

        let created = self.results.create_if_absent(AssessmentResult {
            applicant: applicant.clone(),
            category: category.clone(),
            answers,
        })?;

        info!(
            applicant = %applicant.0,
            category = %category.0,
            close_reason = close_reason.label(),
            created,
            "assessment submission handled"
        );

        let next = self.next_category(&applicant)?;
        Ok(SubmissionOutcome { created, next })
    }
}

/// Error raised by the assessment service. A duplicate submission is not
/// among these: it resolves to a successful outcome with `created: false`.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("assessment category {0:?} not found")]
    CategoryNotFound(CategoryId),
    #[error("category {0:?} is already completed for this applicant")]
    AlreadyCompleted(CategoryId),
    #[error(transparent)]
    Store(#[from] ResultStoreError),
}
