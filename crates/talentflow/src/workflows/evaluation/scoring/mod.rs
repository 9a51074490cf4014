//! Pure score arithmetic for an evaluation's two rating buckets.
//!
//! Policy constants live here and are not configurable per call: the final
//! score is a fixed 40/60 blend, and technical weights are NOT renormalized
//! when they sum to less than 100 — an under-covered KPI set earns
//! proportionally less credit.

mod grade;

pub use grade::Grade;

use super::domain::EvaluationItem;
use serde::{Deserialize, Serialize};

/// Behavioral share of the final score.
pub const BEHAVIOR_WEIGHT: f64 = 0.4;
/// Technical share of the final score.
pub const TECHNICAL_WEIGHT: f64 = 0.6;

/// Derived score set stored on every evaluation. Recomputed server-side on
/// every create and amend; caller-supplied values are never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub behavior_score: f64,
    pub technical_score: f64,
    pub final_score: f64,
    pub grade: Grade,
}

impl Scorecard {
    /// Compute all derived numbers from the rated items. Infallible: empty
    /// buckets contribute zero instead of erroring.
    pub fn compute(behavioral: &[EvaluationItem], technical: &[EvaluationItem]) -> Self {
        let behavior_score = behavior_average(behavioral);
        let technical_score = technical_weighted_sum(technical);
        let final_score = behavior_score * BEHAVIOR_WEIGHT + technical_score * TECHNICAL_WEIGHT;

        Self {
            behavior_score,
            technical_score,
            final_score,
            grade: Grade::from_final_score(final_score),
        }
    }
}

fn behavior_average(items: &[EvaluationItem]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let sum: f64 = items.iter().map(|item| f64::from(item.score)).sum();
    sum / items.len() as f64
}

fn technical_weighted_sum(items: &[EvaluationItem]) -> f64 {
    items
        .iter()
        .map(|item| f64::from(item.weight) / 100.0 * f64::from(item.score))
        .sum()
}

/// Entry-assist rating for technical objectives measured as a percentage of
/// target achievement. Feeds the same 1-5 scale the appraiser could set by
/// hand; never applied without the caller asking for it.
pub fn score_for_achievement(actual_percent: f64) -> u8 {
    if actual_percent > 101.0 {
        5
    } else if actual_percent > 95.0 {
        4
    } else if actual_percent > 75.0 {
        3
    } else if actual_percent > 50.0 {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::evaluation::domain::{CriterionId, CriterionKind};

    fn behavioral(score: u8) -> EvaluationItem {
        EvaluationItem {
            criterion: CriterionId(format!("beh-{score}")),
            kind: CriterionKind::Behavioral,
            target: "-".to_string(),
            actual: "-".to_string(),
            weight: 0,
            score,
            comment: None,
        }
    }

    fn technical(weight: u8, score: u8) -> EvaluationItem {
        EvaluationItem {
            criterion: CriterionId(format!("kpi-{weight}-{score}")),
            kind: CriterionKind::Technical,
            target: "100%".to_string(),
            actual: String::new(),
            weight,
            score,
            comment: None,
        }
    }

    #[test]
    fn behavior_score_is_the_plain_mean() {
        let items = vec![behavioral(4), behavioral(5), behavioral(3)];
        let card = Scorecard::compute(&items, &[]);
        assert!((card.behavior_score - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_buckets_contribute_zero() {
        let card = Scorecard::compute(&[], &[]);
        assert_eq!(card.behavior_score, 0.0);
        assert_eq!(card.technical_score, 0.0);
        assert_eq!(card.final_score, 0.0);
        assert_eq!(card.grade, Grade::Poor);
    }

    #[test]
    fn technical_score_is_not_renormalized() {
        // 50% + 25% coverage: the missing quarter stays missing.
        let items = vec![technical(50, 3), technical(25, 4)];
        let card = Scorecard::compute(&[], &items);
        assert!((card.technical_score - 2.5).abs() < 1e-9);
    }

    #[test]
    fn final_score_blends_forty_sixty() {
        let behavioral_items = vec![behavioral(4), behavioral(4), behavioral(3)];
        let technical_items = vec![technical(50, 3), technical(25, 4)];
        let card = Scorecard::compute(&behavioral_items, &technical_items);
        let expected = (11.0 / 3.0) * BEHAVIOR_WEIGHT + 2.5 * TECHNICAL_WEIGHT;
        assert!((card.final_score - expected).abs() < 1e-9);

        // Worked example: behavior 3.68, technical 3.25 -> 1.472 + 1.95 = 3.422, "Fair".
        let blended = 3.68 * BEHAVIOR_WEIGHT + 3.25 * TECHNICAL_WEIGHT;
        assert!((blended - 3.422).abs() < 1e-9);
        assert_eq!(Grade::from_final_score(blended), Grade::Fair);
    }

    #[test]
    fn identical_inputs_produce_identical_outputs() {
        let behavioral_items = vec![behavioral(4), behavioral(2)];
        let technical_items = vec![technical(40, 5), technical(60, 2)];
        let first = Scorecard::compute(&behavioral_items, &technical_items);
        let second = Scorecard::compute(&behavioral_items, &technical_items);
        assert_eq!(first, second);
    }

    #[test]
    fn achievement_thresholds_follow_the_rating_table() {
        assert_eq!(score_for_achievement(120.0), 5);
        assert_eq!(score_for_achievement(101.0), 4);
        assert_eq!(score_for_achievement(96.0), 4);
        assert_eq!(score_for_achievement(95.0), 3);
        assert_eq!(score_for_achievement(80.0), 3);
        assert_eq!(score_for_achievement(75.0), 2);
        assert_eq!(score_for_achievement(51.0), 2);
        assert_eq!(score_for_achievement(50.0), 1);
        assert_eq!(score_for_achievement(0.0), 1);
    }
}
