use crate::infra::{InMemoryEvaluationRepository, InMemoryResultStore};
use chrono::Utc;
use clap::Args;
use std::sync::Arc;
use talentflow::error::AppError;
use talentflow::workflows::evaluation::{
    score_for_achievement, CriterionKind, DepartmentId, EmployeeId, EmployeeProfile,
    EvaluationDraft, EvaluationPeriod, EvaluationService, ItemDraft, Role,
    StandardCriterionCatalog,
};
use talentflow::workflows::psychotest::{
    ApplicantId, AssessmentService, IpsativeSlot, QuestionType, StandardCategoryCatalog,
    TestSession,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Employee id used for the evaluation portion of the demo.
    #[arg(long, default_value = "emp-2107")]
    pub(crate) employee: String,
    /// Applicant id used for the assessment portion of the demo.
    #[arg(long, default_value = "app-7041")]
    pub(crate) applicant: String,
    /// Skip the evaluation scoring portion.
    #[arg(long)]
    pub(crate) skip_evaluation: bool,
    /// Skip the applicant assessment portion.
    #[arg(long)]
    pub(crate) skip_assessment: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Talentflow engine demo");

    if !args.skip_evaluation {
        run_evaluation_demo(&args.employee)?;
    }
    if !args.skip_assessment {
        run_assessment_demo(&args.applicant)?;
    }

    Ok(())
}

fn run_evaluation_demo(employee: &str) -> Result<(), AppError> {
    let catalog = Arc::new(StandardCriterionCatalog::standard());
    let repository = Arc::new(InMemoryEvaluationRepository::default());
    let service = EvaluationService::new(catalog, repository);

    let profile = EmployeeProfile {
        employee: EmployeeId(employee.to_string()),
        department: Some(DepartmentId("finance".to_string())),
        position: "Finance SPV".to_string(),
    };

    println!("\nEvaluation scoring ({employee}, Finance SPV)");
    let metadata = service.metadata(&profile);
    println!(
        "Applicable criteria: {} behavioral, {} technical",
        metadata.behavioral.len(),
        metadata.technical.len()
    );

    let behavior_ratings = [4u8, 5, 3, 4, 4];
    let achievement_samples = [98.0f64, 88.0, 72.0, 95.5];
    let technical_count = metadata.technical.len().max(1);
    let even_weight = (100 / technical_count) as u8;

    let mut items: Vec<ItemDraft> = Vec::new();
    for (index, criterion) in metadata.behavioral.iter().enumerate() {
        items.push(ItemDraft {
            criterion: criterion.id.clone(),
            kind: CriterionKind::Behavioral,
            target: "-".to_string(),
            actual: "-".to_string(),
            weight: 0,
            score: behavior_ratings[index % behavior_ratings.len()],
            comment: None,
        });
    }
    for (index, criterion) in metadata.technical.iter().enumerate() {
        let achievement = achievement_samples[index % achievement_samples.len()];
        items.push(ItemDraft {
            criterion: criterion.id.clone(),
            kind: CriterionKind::Technical,
            target: "100%".to_string(),
            actual: format!("{achievement}"),
            weight: even_weight,
            score: score_for_achievement(achievement),
            comment: None,
        });
    }

    let draft = EvaluationDraft {
        employee: profile.employee.clone(),
        appraiser: EmployeeId("emp-1001".to_string()),
        period: EvaluationPeriod {
            month: 7,
            year: 2025,
        },
        items,
        feedback: Some("Strong close process; invoicing pace needs attention.".to_string()),
    };

    let evaluation = service.record(draft.clone())?;
    println!(
        "Recorded 7/2025: behavior {:.2}, technical {:.2}, final {:.2} -> {}",
        evaluation.scorecard.behavior_score,
        evaluation.scorecard.technical_score,
        evaluation.scorecard.final_score,
        evaluation.scorecard.grade.label()
    );
    if even_weight as usize * technical_count < 100 {
        println!(
            "Note: technical weights sum to {}%; the uncovered share lowers the score by policy",
            even_weight as usize * technical_count
        );
    }

    let mut amended = draft;
    amended.items.retain(|item| item.kind == CriterionKind::Behavioral);
    let amended = service.amend(Role::Manager, amended)?;
    println!(
        "Amended by a manager to {} items: final {:.2} -> {}",
        amended.items.len(),
        amended.scorecard.final_score,
        amended.scorecard.grade.label()
    );

    let history = service.history(&profile.employee, 2025)?;
    println!(
        "History 2025: {} evaluation(s), annual average {:.2}",
        history.evaluations.len(),
        history.annual_average
    );

    Ok(())
}

fn run_assessment_demo(applicant: &str) -> Result<(), AppError> {
    let catalog = Arc::new(StandardCategoryCatalog::standard());
    let results = Arc::new(InMemoryResultStore::default());
    let service = AssessmentService::new(catalog, results);
    let applicant = ApplicantId(applicant.to_string());

    println!("\nApplicant assessment ({})", applicant.0);

    let mut first_category = None;
    while let Some(category) = service.next_category(&applicant)? {
        if first_category.is_none() {
            first_category = Some(category.clone());
        }

        let mut session = service.open_category(applicant.clone(), &category.id, Utc::now())?;
        println!(
            "Opened '{}' ({} questions, {}s limit)",
            category.name,
            category.questions.len(),
            category.time_limit_seconds
        );

        answer_questions(&mut session);

        let outcome = service.submit(session.finalize(Utc::now()))?;
        match &outcome.next {
            Some(next) => println!("Submitted; next up: {}", next.name),
            None => println!("Submitted; battery finished"),
        }
    }

    // A replayed submission after completion is a silent no-op.
    if let Some(category) = first_category {
        let replay = TestSession::begin(applicant.clone(), category, Utc::now());
        let outcome = service.submit(replay.finalize(Utc::now()))?;
        println!(
            "Replayed first category: created = {} (stored answers untouched)",
            outcome.created
        );
    }

    let progress = service.progress(&applicant)?;
    println!(
        "Progress: {}/{} categories complete",
        progress.completed, progress.total
    );

    Ok(())
}

/// Fill a session with plausible answers, demonstrating the ipsative
/// slot-clearing rule on most/least questions.
fn answer_questions(session: &mut TestSession) {
    for question in session.category().questions.clone() {
        match question.question_type {
            QuestionType::Essay => {
                session
                    .record_answer(
                        question.id,
                        talentflow::workflows::psychotest::Answer::Text(
                            "Handled during onboarding walkthroughs.".to_string(),
                        ),
                    )
                    .expect("essay answers are free text");
            }
            QuestionType::MultipleChoice => {
                let choice = question.options[0].text.clone();
                session
                    .record_answer(
                        question.id,
                        talentflow::workflows::psychotest::Answer::Text(choice),
                    )
                    .expect("choice comes from the option list");
            }
            QuestionType::MostAndLeast => {
                let first = question.options[0].label.clone();
                let last = question.options[question.options.len() - 1].label.clone();
                session
                    .record_pick(question.id.clone(), IpsativeSlot::Least, first.clone())
                    .expect("valid label");
                // Picking the same label as "most" clears the least slot.
                session
                    .record_pick(question.id.clone(), IpsativeSlot::Most, first)
                    .expect("valid label");
                session
                    .record_pick(question.id, IpsativeSlot::Least, last)
                    .expect("valid label");
            }
        }
    }
}
