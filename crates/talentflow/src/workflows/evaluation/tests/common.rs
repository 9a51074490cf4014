use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::evaluation::catalog::StandardCriterionCatalog;
use crate::workflows::evaluation::domain::{
    CriterionId, CriterionKind, EmployeeId, EvaluationDraft, EvaluationPeriod, ItemDraft,
};
use crate::workflows::evaluation::repository::{
    Evaluation, EvaluationRepository, RepositoryError,
};
use crate::workflows::evaluation::service::EvaluationService;

pub(super) fn employee() -> EmployeeId {
    EmployeeId("emp-2107".to_string())
}

pub(super) fn appraiser() -> EmployeeId {
    EmployeeId("emp-1001".to_string())
}

pub(super) fn period(month: u8) -> EvaluationPeriod {
    EvaluationPeriod { month, year: 2025 }
}

pub(super) fn behavioral_item(id: &str, score: u8) -> ItemDraft {
    ItemDraft {
        criterion: CriterionId(id.to_string()),
        kind: CriterionKind::Behavioral,
        target: "-".to_string(),
        actual: "-".to_string(),
        weight: 0,
        score,
        comment: None,
    }
}

pub(super) fn technical_item(id: &str, weight: u8, score: u8) -> ItemDraft {
    ItemDraft {
        criterion: CriterionId(id.to_string()),
        kind: CriterionKind::Technical,
        target: "100%".to_string(),
        actual: "92".to_string(),
        weight,
        score,
        comment: None,
    }
}

/// A complete Finance SPV draft: behavior mean 4.0, weighted technical sum
/// 4.0, final 4.0 ("Good/Meet Expectation").
pub(super) fn finance_draft(month: u8) -> EvaluationDraft {
    EvaluationDraft {
        employee: employee(),
        appraiser: appraiser(),
        period: period(month),
        items: vec![
            behavioral_item("beh-discipline", 4),
            behavioral_item("beh-integrity", 5),
            behavioral_item("beh-teamwork", 3),
            technical_item("fin-closing", 40, 4),
            technical_item("fin-tax", 30, 3),
            technical_item("fin-audit-trail", 30, 5),
        ],
        feedback: Some("Solid quarter close, keep the audit trail tight.".to_string()),
    }
}

pub(super) fn build_service() -> (
    Arc<EvaluationService<StandardCriterionCatalog, MemoryRepository>>,
    Arc<MemoryRepository>,
) {
    let catalog = Arc::new(StandardCriterionCatalog::standard());
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(EvaluationService::new(catalog, repository.clone()));
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<(EmployeeId, i32, u8), Evaluation>>>,
}

fn key(evaluation: &Evaluation) -> (EmployeeId, i32, u8) {
    (
        evaluation.employee.clone(),
        evaluation.period.year,
        evaluation.period.month,
    )
}

impl EvaluationRepository for MemoryRepository {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&key(&evaluation)) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(key(&evaluation), evaluation.clone());
        Ok(evaluation)
    }

    fn replace(&self, evaluation: Evaluation) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&key(&evaluation)) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(key(&evaluation), evaluation);
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
            .filter(|evaluation| {
                &evaluation.employee == employee && evaluation.period.year == year
            })
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn replace(&self, _evaluation: Evaluation) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(
        &self,
        _employee: &EmployeeId,
        _period: EvaluationPeriod,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find(
        &self,
        _employee: &EmployeeId,
        _period: EvaluationPeriod,
    ) -> Result<Option<Evaluation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_for_year(
        &self,
        _employee: &EmployeeId,
        _year: i32,
    ) -> Result<Vec<Evaluation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
