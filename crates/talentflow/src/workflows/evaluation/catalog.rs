use super::domain::{Criterion, CriterionId, CriterionKind, DepartmentId};

/// Read-only view of the criterion catalog. Creating, editing, and deleting
/// criteria belongs to the administration screens, not the engine.
pub trait CriterionCatalog: Send + Sync {
    /// Every behavioral criterion, ordered by title.
    fn behavioral(&self) -> Vec<Criterion>;
    /// Technical criteria applicable to a department/position pair,
    /// including the null-position department-wide fallback rows.
    fn technical(&self, department: Option<&DepartmentId>, position: &str) -> Vec<Criterion>;
    fn find(&self, id: &CriterionId) -> Option<Criterion>;
}

/// In-memory catalog used by the demo CLI and tests. The seed mirrors a
/// typical deployment: global core-value criteria plus per-department KPIs
/// with both position-specific and fallback rows.
#[derive(Debug, Clone)]
pub struct StandardCriterionCatalog {
    criteria: Vec<Criterion>,
}

impl StandardCriterionCatalog {
    pub fn standard() -> Self {
        Self {
            criteria: standard_criteria(),
        }
    }

    pub fn with_criteria(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }
}

impl CriterionCatalog for StandardCriterionCatalog {
    fn behavioral(&self) -> Vec<Criterion> {
        let mut rows: Vec<Criterion> = self
            .criteria
            .iter()
            .filter(|criterion| criterion.kind == CriterionKind::Behavioral)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.title.cmp(&b.title));
        rows
    }

    fn technical(&self, department: Option<&DepartmentId>, position: &str) -> Vec<Criterion> {
        self.criteria
            .iter()
            .filter(|criterion| criterion.kind == CriterionKind::Technical)
            .filter(|criterion| criterion.applies_to(department, position))
            .cloned()
            .collect()
    }

    fn find(&self, id: &CriterionId) -> Option<Criterion> {
        self.criteria
            .iter()
            .find(|criterion| &criterion.id == id)
            .cloned()
    }
}

fn behavioral_criterion(id: &str, title: &str, category: &str) -> Criterion {
    Criterion {
        id: CriterionId(id.to_string()),
        title: title.to_string(),
        category: category.to_string(),
        kind: CriterionKind::Behavioral,
        scope_department: None,
        scope_position: None,
        default_weight: 0,
    }
}

fn technical_criterion(
    id: &str,
    title: &str,
    category: &str,
    department: &str,
    position: Option<&str>,
    default_weight: u8,
) -> Criterion {
    Criterion {
        id: CriterionId(id.to_string()),
        title: title.to_string(),
        category: category.to_string(),
        kind: CriterionKind::Technical,
        scope_department: Some(DepartmentId(department.to_string())),
        scope_position: position.map(|p| p.to_string()),
        default_weight,
    }
}

fn standard_criteria() -> Vec<Criterion> {
    vec![
        behavioral_criterion("beh-discipline", "Work Discipline", "Core Values"),
        behavioral_criterion("beh-integrity", "Integrity & Honesty", "Core Values"),
        behavioral_criterion("beh-teamwork", "Communication & Teamwork", "Core Values"),
        behavioral_criterion("beh-initiative", "Initiative & Innovation", "Competency"),
        behavioral_criterion("beh-results", "Result Orientation", "Competency"),
        technical_criterion(
            "fin-closing",
            "Monthly Closing Accuracy",
            "Accounting",
            "finance",
            Some("Finance SPV"),
            40,
        ),
        technical_criterion(
            "fin-tax",
            "Tax Submission Compliance",
            "Tax",
            "finance",
            Some("Finance SPV"),
            30,
        ),
        technical_criterion(
            "fin-invoicing",
            "Invoicing SLA (< 2 Days)",
            "Billing",
            "finance",
            Some("Finance Admin"),
            50,
        ),
        technical_criterion(
            "fin-audit-trail",
            "Document Audit Trail Completeness",
            "Compliance",
            "finance",
            None,
            30,
        ),
        technical_criterion(
            "it-uptime",
            "System Uptime (> 99.5%)",
            "Operations",
            "it",
            None,
            50,
        ),
        technical_criterion(
            "it-tickets",
            "Support Ticket Resolution SLA",
            "Operations",
            "it",
            None,
            50,
        ),
        technical_criterion(
            "wh-accuracy",
            "Stock Count Accuracy",
            "Inventory",
            "warehouse",
            None,
            60,
        ),
        technical_criterion(
            "wh-dispatch",
            "On-Time Dispatch Rate",
            "Logistics",
            "warehouse",
            Some("Dispatcher"),
            40,
        ),
    ]
}
