use super::domain::{
    AnswerOption, AssessmentCategory, CategoryId, Question, QuestionId, QuestionType,
};

/// Read-only view of the test battery. Authoring categories and questions
/// is an administration concern outside the engine.
pub trait CategoryCatalog: Send + Sync {
    /// Every category, ascending by its explicit `order` field.
    fn ordered(&self) -> Vec<AssessmentCategory>;
    fn category(&self, id: &CategoryId) -> Option<AssessmentCategory>;
}

/// In-memory catalog used by the demo CLI and tests.
#[derive(Debug, Clone)]
pub struct StandardCategoryCatalog {
    categories: Vec<AssessmentCategory>,
}

impl StandardCategoryCatalog {
    pub fn standard() -> Self {
        Self::with_categories(standard_battery())
    }

    pub fn with_categories(categories: Vec<AssessmentCategory>) -> Self {
        Self { categories }
    }
}

impl CategoryCatalog for StandardCategoryCatalog {
    fn ordered(&self) -> Vec<AssessmentCategory> {
        let mut categories = self.categories.clone();
        categories.sort_by_key(|category| category.order);
        categories
    }

    fn category(&self, id: &CategoryId) -> Option<AssessmentCategory> {
        self.categories
            .iter()
            .find(|category| &category.id == id)
            .cloned()
    }
}

fn options(pairs: &[(&str, &str)]) -> Vec<AnswerOption> {
    pairs
        .iter()
        .map(|(label, text)| AnswerOption {
            label: (*label).to_string(),
            text: (*text).to_string(),
        })
        .collect()
}

fn multiple_choice(id: &str, content: &str, pairs: &[(&str, &str)]) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        content: content.to_string(),
        question_type: QuestionType::MultipleChoice,
        options: options(pairs),
    }
}

fn essay(id: &str, content: &str) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        content: content.to_string(),
        question_type: QuestionType::Essay,
        options: Vec::new(),
    }
}

fn most_and_least(id: &str, content: &str, pairs: &[(&str, &str)]) -> Question {
    Question {
        id: QuestionId(id.to_string()),
        content: content.to_string(),
        question_type: QuestionType::MostAndLeast,
        options: options(pairs),
    }
}

fn standard_battery() -> Vec<AssessmentCategory> {
    vec![
        AssessmentCategory {
            id: CategoryId("cat-verbal".to_string()),
            name: "Verbal Reasoning".to_string(),
            description: Some(
                "Read each statement carefully. There is one best answer per question."
                    .to_string(),
            ),
            time_limit_seconds: 300,
            order: 1,
            questions: vec![
                multiple_choice(
                    "vr-1",
                    "Which word is closest in meaning to 'diligent'?",
                    &[
                        ("A", "Careless"),
                        ("B", "Hard-working"),
                        ("C", "Talkative"),
                        ("D", "Forgetful"),
                    ],
                ),
                multiple_choice(
                    "vr-2",
                    "All auditors are accountants. Some accountants are managers. Therefore:",
                    &[
                        ("A", "All auditors are managers"),
                        ("B", "Some auditors may be managers"),
                        ("C", "No auditor is a manager"),
                        ("D", "All managers are auditors"),
                    ],
                ),
                essay(
                    "vr-3",
                    "Describe a situation where you had to explain a complex process to a colleague.",
                ),
            ],
        },
        AssessmentCategory {
            id: CategoryId("cat-numerical".to_string()),
            name: "Numerical Reasoning".to_string(),
            description: Some(
                "Calculators are not permitted. Answer as many questions as you can."
                    .to_string(),
            ),
            time_limit_seconds: 420,
            order: 2,
            questions: vec![
                multiple_choice(
                    "nr-1",
                    "A warehouse ships 480 parcels in 8 hours. At the same rate, how many parcels ship in 3 hours?",
                    &[("A", "150"), ("B", "160"), ("C", "180"), ("D", "200")],
                ),
                multiple_choice(
                    "nr-2",
                    "An invoice of 2,400 carries a 12.5% discount. What is the discounted total?",
                    &[("A", "2,050"), ("B", "2,100"), ("C", "2,150"), ("D", "2,200")],
                ),
            ],
        },
        AssessmentCategory {
            id: CategoryId("cat-workstyle".to_string()),
            name: "Work Style Profile".to_string(),
            description: Some(
                "For each group of statements, mark the one MOST like you and the one LEAST like you."
                    .to_string(),
            ),
            time_limit_seconds: 600,
            order: 3,
            questions: vec![
                most_and_least(
                    "ws-1",
                    "In a team setting I am usually the one who...",
                    &[
                        ("A", "Takes charge of the plan"),
                        ("B", "Keeps everyone's spirits up"),
                        ("C", "Makes sure the details are right"),
                        ("D", "Keeps the peace when opinions clash"),
                    ],
                ),
                most_and_least(
                    "ws-2",
                    "Under a tight deadline I tend to...",
                    &[
                        ("A", "Push the pace and decide quickly"),
                        ("B", "Rally others around the goal"),
                        ("C", "Double-check before committing"),
                        ("D", "Stay calm and keep a steady rhythm"),
                    ],
                ),
            ],
        },
    ]
}
