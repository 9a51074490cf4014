use super::catalog::CategoryCatalog;
use super::domain::{ApplicantId, AssessmentCategory};
use super::repository::{ResultStore, ResultStoreError};

/// The first category, in ascending catalog order, with no stored result
/// for this applicant; `None` once every category has one.
///
/// Recomputed from the catalog and store on every call — no cached "next"
/// pointer — so categories added or reordered between sessions are picked
/// up, and selection follows catalog order even when the applicant
/// completed later categories first.
pub fn next_category<C, R>(
    catalog: &C,
    results: &R,
    applicant: &ApplicantId,
) -> Result<Option<AssessmentCategory>, ResultStoreError>
where
    C: CategoryCatalog + ?Sized,
    R: ResultStore + ?Sized,
{
    let completed = results.completed_categories(applicant)?;
    Ok(catalog
        .ordered()
        .into_iter()
        .find(|category| !completed.contains(&category.id)))
}
