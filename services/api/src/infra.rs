use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talentflow::workflows::evaluation::{
    EmployeeId, Evaluation, EvaluationPeriod, EvaluationRepository, RepositoryError,
};
use talentflow::workflows::psychotest::{
    ApplicantId, AssessmentResult, CategoryId, ResultStore, ResultStoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Evaluation store backed by a process-local map. The uniqueness of the
/// `(employee, period)` key is enforced here, standing in for the database
/// constraint a durable deployment would rely on.
#[derive(Default, Clone)]
pub(crate) struct InMemoryEvaluationRepository {
    records: Arc<Mutex<HashMap<(EmployeeId, i32, u8), Evaluation>>>,
}

fn evaluation_key(evaluation: &Evaluation) -> (EmployeeId, i32, u8) {
    (
        evaluation.employee.clone(),
        evaluation.period.year,
        evaluation.period.month,
    )
}

impl EvaluationRepository for InMemoryEvaluationRepository {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&evaluation_key(&evaluation)) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(evaluation_key(&evaluation), evaluation.clone());
        Ok(evaluation)
    }

    fn replace(&self, evaluation: Evaluation) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&evaluation_key(&evaluation)) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(evaluation_key(&evaluation), evaluation);
        Ok(())
    }

    fn delete(
        &self,
        employee: &EmployeeId,
        period: EvaluationPeriod,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(&(employee.clone(), period.year, period.month))
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn find(
        &self,
        employee: &EmployeeId,
        period: EvaluationPeriod,
    ) -> Result<Option<Evaluation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(&(employee.clone(), period.year, period.month))
            .cloned())
    }

    fn list_for_year(
        &self,
        employee: &EmployeeId,
        year: i32,
    ) -> Result<Vec<Evaluation>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|evaluation| &evaluation.employee == employee && evaluation.period.year == year)
            .cloned()
            .collect())
    }
}

/// Assessment result store with conditional-insert semantics on the
/// `(applicant, category)` pair: the first write wins, later writes are
/// discarded and reported as `created: false`.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultStore {
    records: Arc<Mutex<HashMap<(ApplicantId, CategoryId), AssessmentResult>>>,
}

impl ResultStore for InMemoryResultStore {
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
