//! Countdown-bound answer collection for one applicant/category attempt.
//!
//! The session is a caller-held value: created when the applicant opens a
//! not-yet-completed category, mutated as answers come in, and consumed by
//! [`TestSession::finalize`]. Consuming `self` is what makes the state
//! machine single-pass — there is no way to record into or re-submit an
//! attempt that has already exited. Any client-side countdown is advisory
//! UI; the deadline that counts is the elapsed wall-clock check at
//! finalization.

use chrono::{DateTime, Duration, Utc};

use super::domain::{
    Answer, AnswerError, AnswerSheet, ApplicantId, AssessmentCategory, QuestionId, QuestionType,
};
use super::ipsative::{IpsativeSlot, MostLeastPick};

/// How an attempt reached its terminal state. Expiry and manual submission
/// are the same event as far as persistence is concerned; the reason only
/// feeds logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Manual,
    Expired,
}

impl CloseReason {
    pub const fn label(self) -> &'static str {
        match self {
            CloseReason::Manual => "manual",
            CloseReason::Expired => "expired",
        }
    }
}

/// A running attempt: the category's questions, the answers held so far,
/// and the server-side start instant the deadline is measured from.
#[derive(Debug, Clone)]
pub struct TestSession {
    applicant: ApplicantId,
    category: AssessmentCategory,
    answers: AnswerSheet,
    started_at: DateTime<Utc>,
}

/// What `finalize` hands to the submission path.
#[derive(Debug, Clone)]
pub struct CompletedAttempt {
    pub applicant: ApplicantId,
    pub category: super::domain::CategoryId,
    pub answers: AnswerSheet,
    pub close_reason: CloseReason,
}

impl TestSession {
    pub fn begin(
        applicant: ApplicantId,
        category: AssessmentCategory,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            applicant,
            category,
            answers: AnswerSheet::default(),
            started_at,
        }
    }

    pub fn applicant(&self) -> &ApplicantId {
        &self.applicant
    }

    pub fn category(&self) -> &AssessmentCategory {
        &self.category
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.started_at + Duration::seconds(i64::from(self.category.time_limit_seconds))
    }

    /// Seconds left on the clock, clamped at zero. Display only.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.deadline() - now).num_seconds().max(0)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline()
    }

    /// Store a whole answer after validating it against the question.
    pub fn record_answer(
        &mut self,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<(), AnswerError> {
        let question = self
            .category
            .question(&question_id)
            .ok_or_else(|| AnswerError::UnknownQuestion(question_id.clone()))?;
        question.validate_answer(&answer)?;
        self.answers.insert(question_id, answer);
        Ok(())
    }

    /// Set one half of an ipsative answer, applying the slot-clearing rule
    /// to whatever is already held for the question. Returns the updated
    /// pair so callers can reflect the cleared slot.
    pub fn record_pick(
        &mut self,
        question_id: QuestionId,
        slot: IpsativeSlot,
        label: impl Into<String>,
    ) -> Result<MostLeastPick, AnswerError> {
        let label = label.into();
        let question = self
            .category
            .question(&question_id)
            .ok_or_else(|| AnswerError::UnknownQuestion(question_id.clone()))?;
        if question.question_type != QuestionType::MostAndLeast {
            return Err(AnswerError::TypeMismatch {
                question: question_id,
                expected: question.question_type,
            });
        }
        if !question.has_option_label(&label) {
            return Err(AnswerError::UnknownOption {
                question: question_id,
                value: label,
            });
        }

        let mut pick = match self.answers.get(&question_id) {
            Some(Answer::MostLeast(existing)) => existing.clone(),
            _ => MostLeastPick::default(),
        };
        pick.assign(slot, label);
        self.answers
            .insert(question_id, Answer::MostLeast(pick.clone()));
        Ok(pick)
    }

    /// Exit the session. Whatever answers are held are submitted as-is;
    /// unanswered questions stay absent. Expiry is judged here, against the
    /// server clock, never against a client-reported flag.
    pub fn finalize(self, now: DateTime<Utc>) -> CompletedAttempt {
        let close_reason = if self.is_expired(now) {
            CloseReason::Expired
        } else {
            CloseReason::Manual
        };

        CompletedAttempt {
            applicant: self.applicant,
            category: self.category.id,
            answers: self.answers,
            close_reason,
        }
    }
}
