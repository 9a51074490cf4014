use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ipsative::MostLeastPick;

/// Identifier wrapper for assessment applicants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Identifier wrapper for assessment categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub String);

/// Identifier wrapper for questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

/// Question formats supported by the test engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    Essay,
    MultipleChoice,
    MostAndLeast,
}

impl QuestionType {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionType::Essay => "essay",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::MostAndLeast => "most_and_least",
        }
    }
}

/// One selectable statement, addressed by its label ("A", "B", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub content: String,
    pub question_type: QuestionType,
    /// Ordered option list; empty for essays.
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option_labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.label.as_str())
    }

    pub fn has_option_label(&self, label: &str) -> bool {
        self.options.iter().any(|option| option.label == label)
    }

    pub fn has_option_text(&self, text: &str) -> bool {
        self.options.iter().any(|option| option.text == text)
    }

    /// Check an answer's shape against this question. Ipsative picks must
    /// use labels from the option set and keep the two slots distinct.
    pub fn validate_answer(&self, answer: &Answer) -> Result<(), AnswerError> {
        match (self.question_type, answer) {
            (QuestionType::Essay, Answer::Text(_)) => Ok(()),
            (QuestionType::MultipleChoice, Answer::Text(choice)) => {
                if self.has_option_text(choice) {
                    Ok(())
                } else {
                    Err(AnswerError::UnknownOption {
                        question: self.id.clone(),
                        value: choice.clone(),
                    })
                }
            }
            (QuestionType::MostAndLeast, Answer::MostLeast(pick)) => {
                for label in [&pick.most, &pick.least] {
                    if !label.is_empty() && !self.has_option_label(label) {
                        return Err(AnswerError::UnknownOption {
                            question: self.id.clone(),
                            value: label.clone(),
                        });
                    }
                }
                if !pick.is_mutually_exclusive() {
                    return Err(AnswerError::IpsativeOverlap {
                        question: self.id.clone(),
                    });
                }
                Ok(())
            }
            (expected, _) => Err(AnswerError::TypeMismatch {
                question: self.id.clone(),
                expected,
            }),
        }
    }
}

/// An ordered block of questions with its own countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub time_limit_seconds: u32,
    /// Explicit catalog position; the sequencer walks these ascending.
    pub order: u32,
    pub questions: Vec<Question>,
}

impl AssessmentCategory {
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }
}

/// A recorded answer. Essays and multiple choice store plain text; ipsative
/// questions store the most/least pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    MostLeast(MostLeastPick),
}

/// Map from question to answer. Unanswered questions are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(pub BTreeMap<QuestionId, Answer>);

impl AnswerSheet {
    pub fn insert(&mut self, question: QuestionId, answer: Answer) {
        self.0.insert(question, answer);
    }

    pub fn get(&self, question: &QuestionId) -> Option<&Answer> {
        self.0.get(question)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.0.iter()
    }
}

/// The single, immutable record of one applicant's attempt at one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub applicant: ApplicantId,
    pub category: CategoryId,
    pub answers: AnswerSheet,
}

/// Answer-shape violations. Recoverable by the caller; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("question {0:?} is not part of this category")]
    UnknownQuestion(QuestionId),
    #[error("answer for question {question:?} does not match its {} format", .expected.label())]
    TypeMismatch {
        question: QuestionId,
        expected: QuestionType,
    },
    #[error("'{value}' is not an option of question {question:?}")]
    UnknownOption { question: QuestionId, value: String },
    #[error("most and least picks for question {question:?} must differ")]
    IpsativeOverlap { question: QuestionId },
}
