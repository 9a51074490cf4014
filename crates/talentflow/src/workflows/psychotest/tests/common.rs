use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::psychotest::catalog::StandardCategoryCatalog;
use crate::workflows::psychotest::domain::{
    Answer, AnswerSheet, ApplicantId, AssessmentResult, CategoryId, QuestionId,
};
use crate::workflows::psychotest::repository::{ResultStore, ResultStoreError};
use crate::workflows::psychotest::service::AssessmentService;

pub(super) fn applicant() -> ApplicantId {
    ApplicantId("app-7041".to_string())
}

pub(super) fn verbal() -> CategoryId {
    CategoryId("cat-verbal".to_string())
}

pub(super) fn numerical() -> CategoryId {
    CategoryId("cat-numerical".to_string())
}

pub(super) fn workstyle() -> CategoryId {
    CategoryId("cat-workstyle".to_string())
}

pub(super) fn session_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn text_answer(question: &str, value: &str) -> (QuestionId, Answer) {
    (
        QuestionId(question.to_string()),
        Answer::Text(value.to_string()),
    )
}

pub(super) fn sheet(entries: Vec<(QuestionId, Answer)>) -> AnswerSheet {
    let mut sheet = AnswerSheet::default();
    for (question, answer) in entries {
        sheet.insert(question, answer);
    }
    sheet
}

/// Valid answers for the "Verbal Reasoning" category of the standard battery.
pub(super) fn verbal_sheet() -> AnswerSheet {
    sheet(vec![
        text_answer("vr-1", "Hard-working"),
        text_answer("vr-2", "Some auditors may be managers"),
        text_answer("vr-3", "I walked a new hire through month-end closing."),
    ])
}

pub(super) fn build_service() -> (
    Arc<AssessmentService<StandardCategoryCatalog, MemoryResultStore>>,
    Arc<MemoryResultStore>,
) {
    let catalog = Arc::new(StandardCategoryCatalog::standard());
    let results = Arc::new(MemoryResultStore::default());
    let service = Arc::new(AssessmentService::new(catalog, results.clone()));
    (service, results)
}

#[derive(Default, Clone)]
pub(super) struct MemoryResultStore {
    records: Arc<Mutex<HashMap<(ApplicantId, CategoryId), AssessmentResult>>>,
}

impl ResultStore for MemoryResultStore {
    fn create_if_absent(&self, result: AssessmentResult) -> Result<bool, ResultStoreError> {
        let mut guard = self.records.lock().expect("result mutex poisoned");
        let key = (result.applicant.clone(), result.category.clone());
        if guard.contains_key(&key) {
            return Ok(false);
        }
        guard.insert(key, result);
        Ok(true)
    }

    fn has_result(
        &self,
        applicant: &ApplicantId,
        category: &CategoryId,
    ) -> Result<bool, ResultStoreError> {
        let guard = self.records.lock().expect("result mutex poisoned");
        Ok(guard.contains_key(&(applicant.clone(), category.clone())))
    }

    fn completed_categories(
        &self,
        applicant: &ApplicantId,
    ) -> Result<BTreeSet<CategoryId>, ResultStoreError> {
        let guard = self.records.lock().expect("result mutex poisoned");
        Ok(guard
            .keys()
            .filter(|(owner, _)| owner == applicant)
            .map(|(_, category)| category.clone())
            .collect())
    }

    fn find(
        &self,
        applicant: &ApplicantId,
        category: &CategoryId,
    ) -> Result<Option<AssessmentResult>, ResultStoreError> {
        let guard = self.records.lock().expect("result mutex poisoned");
        Ok(guard.get(&(applicant.clone(), category.clone())).cloned())
    }
}

pub(super) struct UnavailableResultStore;

impl ResultStore for UnavailableResultStore {
    fn create_if_absent(&self, _result: AssessmentResult) -> Result<bool, ResultStoreError> {
        Err(ResultStoreError::Unavailable("store offline".to_string()))
    }

    fn has_result(
        &self,
        _applicant: &ApplicantId,
        _category: &CategoryId,
    ) -> Result<bool, ResultStoreError> {
        Err(ResultStoreError::Unavailable("store offline".to_string()))
    }

    fn completed_categories(
        &self,
        _applicant: &ApplicantId,
    ) -> Result<BTreeSet<CategoryId>, ResultStoreError> {
        Err(ResultStoreError::Unavailable("store offline".to_string()))
    }

    fn find(
        &self,
        _applicant: &ApplicantId,
        _category: &CategoryId,
    ) -> Result<Option<AssessmentResult>, ResultStoreError> {
        Err(ResultStoreError::Unavailable("store offline".to_string()))
    }
}
