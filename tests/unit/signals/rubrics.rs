//! Unit tests for rubric factor construction

use setup_engine::models::classification::ScanType;
use setup_engine::models::indicators::IndicatorSnapshot;
use setup_engine::models::levels::{Direction, EntryZone, Levels, SwingLevels};
use setup_engine::models::score::{Grade, Rubric};
use setup_engine::signals::{build_factors, rubric_for, score, RubricWeights};

fn swing_levels(entry: f64, target_1: f64, risk_reward: f64) -> Levels {
    Levels::Swing(SwingLevels {
        direction: Direction::Buy,
        entry,
        entry_zone: EntryZone {
            low: entry - 0.5,
            high: entry + 0.5,
        },
        stop_loss: entry - (target_1 - entry) / risk_reward,
        target_1,
        target_2: target_1 + 5.0,
        target_3: target_1 + 10.0,
        risk_reward,
        risk_percent: 4.0,
        reward_percent: 12.0,
    })
}

#[test]
fn test_weights_sum_to_100() {
    assert!(RubricWeights::verify(Rubric::Momentum));
    assert!(RubricWeights::verify(Rubric::Pullback));
}

#[test]
fn test_rubric_for_scan_type() {
    assert_eq!(rubric_for(ScanType::Pullback), Rubric::Pullback);
    assert_eq!(rubric_for(ScanType::Momentum), Rubric::Momentum);
    assert_eq!(rubric_for(ScanType::APlusMomentum), Rubric::Momentum);
    assert_eq!(rubric_for(ScanType::Breakout), Rubric::Momentum);
    assert_eq!(rubric_for(ScanType::ConsolidationBreakout), Rubric::Momentum);
}

#[test]
fn test_factors_follow_weight_table() {
    let snapshot = IndicatorSnapshot::new("INFY", 100.0);
    for rubric in [Rubric::Momentum, Rubric::Pullback] {
        let factors = build_factors(rubric, &snapshot, None);
        let shape: Vec<(&str, u32)> = factors.iter().map(|f| (f.name.as_str(), f.max)).collect();
        assert_eq!(shape, RubricWeights::for_rubric(rubric).to_vec());
    }
}

#[test]
fn test_missing_inputs_score_zero() {
    let snapshot = IndicatorSnapshot::new("INFY", 100.0);
    let result = score(&build_factors(Rubric::Momentum, &snapshot, None), Rubric::Momentum);
    // Only price accessibility can be judged from a bare quote.
    assert_eq!(result.total, 10);
    assert_eq!(result.grade, Grade::F);
}

#[test]
fn test_strong_momentum_setup() {
    let mut snapshot = IndicatorSnapshot::new("INFY", 100.0)
        .with_rsi(60.0, 65.0)
        .with_volume_vs_avg(2.1);
    snapshot.weekly_change_pct = Some(5.0);
    snapshot.institutional_score = Some(90.0);
    let levels = swing_levels(100.0, 112.0, 3.0);

    let result = score(&build_factors(Rubric::Momentum, &snapshot, Some(&levels)), Rubric::Momentum);
    assert_eq!(result.total, 99);
    assert_eq!(result.grade, Grade::APlus);
}

#[test]
fn test_healthy_pullback_without_levels() {
    let mut snapshot = IndicatorSnapshot::new("INFY", 100.5)
        .with_moving_averages(100.0, 95.0, 90.0)
        .with_rsi(45.0, 55.0)
        .with_volume_vs_avg(0.5)
        .with_atr_pct(2.0);
    snapshot.relative_strength = Some(6.0);

    let factors = build_factors(Rubric::Pullback, &snapshot, None);
    let risk_reward = factors.iter().find(|f| f.name == "risk_reward").unwrap();
    assert_eq!(risk_reward.points, 0);
    assert!(risk_reward.raw_value.is_none());

    let result = score(&factors, Rubric::Pullback);
    assert_eq!(result.total, 83);
    assert_eq!(result.grade, Grade::APlus);
}
