//! Unit tests for scoring and grading

use setup_engine::models::score::{Factor, FactorTag, Grade, Rubric};
use setup_engine::signals::scoring::{grade_for, score, tag_for, GRADE_TABLE};

fn rank(grade: Grade) -> usize {
    GRADE_TABLE
        .iter()
        .position(|(_, g)| *g == grade)
        .expect("grade listed in table")
}

#[test]
fn test_grade_thresholds() {
    assert_eq!(grade_for(100), Grade::APlus);
    assert_eq!(grade_for(80), Grade::APlus);
    assert_eq!(grade_for(79), Grade::A);
    assert_eq!(grade_for(70), Grade::A);
    assert_eq!(grade_for(60), Grade::BPlus);
    assert_eq!(grade_for(50), Grade::B);
    assert_eq!(grade_for(40), Grade::C);
    assert_eq!(grade_for(30), Grade::D);
    assert_eq!(grade_for(29), Grade::F);
    assert_eq!(grade_for(0), Grade::F);
}

#[test]
fn test_grade_is_monotonic() {
    for total in 0..100 {
        assert!(
            rank(grade_for(total + 1)) <= rank(grade_for(total)),
            "grade dropped between {} and {}",
            total,
            total + 1
        );
    }
}

#[test]
fn test_tag_for() {
    assert_eq!(tag_for(14, 20), FactorTag::Strength);
    assert_eq!(tag_for(10, 20), FactorTag::Neutral);
    assert_eq!(tag_for(7, 20), FactorTag::Watch);
    assert_eq!(tag_for(0, 0), FactorTag::Neutral);
}

#[test]
fn test_score_clamps_to_factor_max() {
    let factors = vec![
        Factor::new("volume_conviction", Some(3.0), 25, 20, "huge volume"),
        Factor::new("rsi_position", Some(60.0), 15, 15, "sweet spot"),
        Factor::missing("fundamentals", 10),
    ];
    let result = score(&factors, Rubric::Momentum);
    assert_eq!(result.total, 35);
    assert_eq!(result.breakdown[0].points, 20);
    assert_eq!(result.grade, Grade::D);
    assert_eq!(result.strengths(), vec!["volume_conviction", "rsi_position"]);
    assert_eq!(result.watch_items(), vec!["fundamentals"]);

    let summed: u32 = result.breakdown.iter().map(|l| l.points).sum();
    assert_eq!(summed, result.total);
}

#[test]
fn test_score_total_capped_at_100() {
    let factors: Vec<Factor> = (0..6)
        .map(|i| Factor::new(&format!("f{}", i), None, 20, 20, "full marks"))
        .collect();
    let result = score(&factors, Rubric::Pullback);
    assert_eq!(result.total, 100);
    assert_eq!(result.grade, Grade::APlus);
    assert_eq!(result.rubric, Rubric::Pullback);
}
