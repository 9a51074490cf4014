use serde::{Deserialize, Serialize};

/// Identifier wrapper for employees (appraisers are employees too).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for evaluation criteria.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CriterionId(pub String);

/// Identifier wrapper for departments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

/// The two buckets an evaluation is scored over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriterionKind {
    Behavioral,
    Technical,
}

impl CriterionKind {
    pub const fn label(self) -> &'static str {
        match self {
            CriterionKind::Behavioral => "behavioral",
            CriterionKind::Technical => "technical",
        }
    }
}

/// A single evaluable trait or objective from the read-only catalog.
///
/// Behavioral criteria are global. Technical criteria are scoped: a `None`
/// department applies everywhere, and a `None` position is the
/// department-wide fallback that applies alongside position-specific rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub title: String,
    pub category: String,
    pub kind: CriterionKind,
    pub scope_department: Option<DepartmentId>,
    pub scope_position: Option<String>,
    /// Advisory default (0-100); never consulted at scoring time.
    pub default_weight: u8,
}

impl Criterion {
    /// Explicit two-clause scope filter: department must match (or be
    /// unscoped) and position must match exactly or be the null fallback.
    pub fn applies_to(&self, department: Option<&DepartmentId>, position: &str) -> bool {
        let department_ok = match &self.scope_department {
            Some(scope) => Some(scope) == department,
            None => true,
        };
        let position_ok = match &self.scope_position {
            Some(scope) => scope == position,
            None => true,
        };
        department_ok && position_ok
    }
}

/// Identity snapshot the caller supplies when resolving applicable criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub employee: EmployeeId,
    pub department: Option<DepartmentId>,
    pub position: String,
}

/// Month/year key of an evaluation. One evaluation per employee per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationPeriod {
    pub month: u8,
    pub year: i32,
}

impl EvaluationPeriod {
    pub fn validate(self) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(ValidationError::InvalidMonth(self.month));
        }
        Ok(self)
    }
}

/// Caller-provided rating for one criterion, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub criterion: CriterionId,
    /// Declared bucket; must match the catalog's stored kind.
    pub kind: CriterionKind,
    pub target: String,
    pub actual: String,
    /// Percentage of the technical bucket (0-100).
    pub weight: u8,
    /// Rating on the 1-5 scale.
    pub score: u8,
    pub comment: Option<String>,
}

/// A validated, stored rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationItem {
    pub criterion: CriterionId,
    pub kind: CriterionKind,
    pub target: String,
    pub actual: String,
    pub weight: u8,
    pub score: u8,
    pub comment: Option<String>,
}

/// Inbound payload for recording or amending an evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationDraft {
    pub employee: EmployeeId,
    pub appraiser: EmployeeId,
    pub period: EvaluationPeriod,
    pub items: Vec<ItemDraft>,
    pub feedback: Option<String>,
}

/// Roles the identity collaborator can attach to a request. The engine
/// trusts the supplied role; it never re-derives identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Employee,
    Appraiser,
    Manager,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Appraiser => "appraiser",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Amending a recorded evaluation requires an elevated role.
    pub const fn can_amend(self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }

    /// Deleting requires appraiser-or-above.
    pub const fn can_delete(self) -> bool {
        matches!(self, Role::Appraiser | Role::Manager | Role::Admin)
    }
}

/// Validation failures the caller can fix by correcting input. Never
/// retried automatically and never silently corrected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("month must be 1-12, got {0}")]
    InvalidMonth(u8),
    #[error("an evaluation needs at least one rated item")]
    EmptyItemSet,
    #[error("score for criterion {criterion:?} must be 1-5, got {score}")]
    ScoreOutOfRange { criterion: CriterionId, score: u8 },
    #[error("weight for criterion {criterion:?} must be 0-100, got {weight}")]
    WeightOutOfRange { criterion: CriterionId, weight: u8 },
    #[error(
        "criterion {criterion:?} is declared {} but cataloged as {}",
        .declared.label(),
        .stored.label()
    )]
    KindMismatch {
        criterion: CriterionId,
        declared: CriterionKind,
        stored: CriterionKind,
    },
    #[error("criterion {criterion:?} appears more than once")]
    DuplicateCriterion { criterion: CriterionId },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technical(department: Option<&str>, position: Option<&str>) -> Criterion {
        Criterion {
            id: CriterionId("kpi-1".to_string()),
            title: "Monthly Closing Accuracy".to_string(),
            category: "Accounting".to_string(),
            kind: CriterionKind::Technical,
            scope_department: department.map(|d| DepartmentId(d.to_string())),
            scope_position: position.map(|p| p.to_string()),
            default_weight: 0,
        }
    }

    #[test]
    fn position_specific_criterion_requires_exact_position() {
        let criterion = technical(Some("finance"), Some("Finance SPV"));
        let finance = DepartmentId("finance".to_string());
        assert!(criterion.applies_to(Some(&finance), "Finance SPV"));
        assert!(!criterion.applies_to(Some(&finance), "Finance Admin"));
    }

    #[test]
    fn null_position_is_a_department_wide_fallback() {
        let criterion = technical(Some("finance"), None);
        let finance = DepartmentId("finance".to_string());
        let warehouse = DepartmentId("warehouse".to_string());
        assert!(criterion.applies_to(Some(&finance), "Finance SPV"));
        assert!(criterion.applies_to(Some(&finance), "Finance Admin"));
        assert!(!criterion.applies_to(Some(&warehouse), "Picker"));
    }

    #[test]
    fn unscoped_criterion_applies_everywhere() {
        let criterion = technical(None, None);
        let finance = DepartmentId("finance".to_string());
        assert!(criterion.applies_to(Some(&finance), "Finance SPV"));
        assert!(criterion.applies_to(None, "Contractor"));
    }

    #[test]
    fn period_rejects_month_zero_and_thirteen() {
        assert!(EvaluationPeriod { month: 0, year: 2025 }.validate().is_err());
        assert!(EvaluationPeriod { month: 13, year: 2025 }.validate().is_err());
        assert!(EvaluationPeriod { month: 12, year: 2025 }.validate().is_ok());
    }

    #[test]
    fn role_gates_follow_the_hierarchy() {
        assert!(!Role::Employee.can_delete());
        assert!(Role::Appraiser.can_delete());
        assert!(!Role::Appraiser.can_amend());
        assert!(Role::Manager.can_amend());
        assert!(Role::Admin.can_amend());
    }
}
