//! Timed, category-sequenced psychometric assessments for applicants.
//!
//! Each category runs as a countdown-bound session; submission is
//! at-most-once per applicant/category pair, and the sequencer walks the
//! catalog in order until every category has a result.

pub mod catalog;
pub mod domain;
pub mod ipsative;
pub mod repository;
pub mod router;
pub mod sequencer;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use catalog::{CategoryCatalog, StandardCategoryCatalog};
pub use domain::{
    Answer, AnswerError, AnswerOption, AnswerSheet, ApplicantId, AssessmentCategory,
    AssessmentResult, CategoryId, Question, QuestionId, QuestionType,
};
pub use ipsative::{IpsativeSlot, MostLeastPick};
pub use repository::{ResultStore, ResultStoreError};
pub use router::{assessment_router, CategorySummary, OpenSessionView};
pub use sequencer::next_category;
pub use service::{
    AssessmentProgress, AssessmentService, AssessmentServiceError, SubmissionOutcome,
};
pub use session::{CloseReason, CompletedAttempt, TestSession};
