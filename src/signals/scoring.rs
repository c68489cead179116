//! Score aggregation and letter grading

use crate::models::score::{Factor, FactorTag, Grade, Rubric, ScoreLine, ScoreResult};

pub const MAX_TOTAL: u32 = 100;

/// Minimum total for each grade, best first. Monotonic and exhaustive: the
/// last row starts at zero so every total maps to exactly one grade.
pub const GRADE_TABLE: [(u32, Grade); 7] = [
    (80, Grade::APlus),
    (70, Grade::A),
    (60, Grade::BPlus),
    (50, Grade::B),
    (40, Grade::C),
    (30, Grade::D),
    (0, Grade::F),
];

pub fn grade_for(total: u32) -> Grade {
    GRADE_TABLE
        .iter()
        .find(|(min, _)| total >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

/// `Strength` at 70% of the factor's maximum or more, `Watch` below 40%.
pub fn tag_for(points: u32, max: u32) -> FactorTag {
    if max == 0 {
        return FactorTag::Neutral;
    }
    if points * 10 >= max * 7 {
        FactorTag::Strength
    } else if points * 10 < max * 4 {
        FactorTag::Watch
    } else {
        FactorTag::Neutral
    }
}

/// Sum a factor list into a graded score.
///
/// Each factor is clamped to its own maximum and the running total to
/// `MAX_TOTAL`, so the breakdown always sums to the reported total.
pub fn score(factors: &[Factor], rubric: Rubric) -> ScoreResult {
    let mut total = 0u32;
    let breakdown = factors
        .iter()
        .map(|factor| {
            let points = factor.points.min(factor.max).min(MAX_TOTAL - total);
            total += points;
            ScoreLine {
                factor: factor.name.clone(),
                points,
                max: factor.max,
                reason: factor.reason.clone(),
                tag: tag_for(points, factor.max),
            }
        })
        .collect();

    ScoreResult {
        rubric,
        total,
        grade: grade_for(total),
        breakdown,
    }
}
