use serde::{Deserialize, Serialize};

/// Qualitative band for a final score. Intervals are closed on the upper
/// bound and evaluated in ascending order, so a boundary value belongs to
/// the lower band: exactly 3.50 is still `Fair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Poor,
    Unsatisfactory,
    Fair,
    Good,
    VeryGood,
}

impl Grade {
    pub fn from_final_score(score: f64) -> Self {
        if score <= 1.50 {
            Grade::Poor
        } else if score <= 2.50 {
            Grade::Unsatisfactory
        } else if score <= 3.50 {
            Grade::Fair
        } else if score <= 4.50 {
            Grade::Good
        } else {
            Grade::VeryGood
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Grade::Poor => "Poor",
            Grade::Unsatisfactory => "Unsatisfactory",
            Grade::Fair => "Fair/Need Improvement",
            Grade::Good => "Good/Meet Expectation",
            Grade::VeryGood => "Very Good/Exceed Expectation",
        }
    }
}
