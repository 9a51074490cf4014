use std::collections::BTreeSet;

use super::domain::{ApplicantId, AssessmentResult, CategoryId};

/// Storage abstraction for finished attempts.
///
/// `create_if_absent` is the only write: a conditional insert keyed on
/// `(applicant, category)`. On conflict the candidate answers are discarded
/// and the stored record stays untouched — that, plus the store's uniqueness
/// constraint on the pair, is what makes concurrent double-submits safe
/// without any engine-side locking.
pub trait ResultStore: Send + Sync {
    /// Returns `true` when this call created the record, `false` when a
    /// result already existed (the no-op outcome, not an error).
    fn create_if_absent(&self, result: AssessmentResult) -> Result<bool, ResultStoreError>;
    fn has_result(
        &self,
        applicant: &ApplicantId,
        category: &CategoryId,
    ) -> Result<bool, ResultStoreError>;
    /// Category ids this applicant has completed.
    fn completed_categories(
        &self,
        applicant: &ApplicantId,
    ) -> Result<BTreeSet<CategoryId>, ResultStoreError>;
    fn find(
        &self,
        applicant: &ApplicantId,
        category: &CategoryId,
    ) -> Result<Option<AssessmentResult>, ResultStoreError>;
}

/// Error enumeration for result-store failures. A duplicate submission is
/// deliberately not represented here.
#[derive(Debug, thiserror::Error)]
pub enum ResultStoreError {
    #[error("result store unavailable: {0}")]
    Unavailable(String),
}
