//! Unit tests for risk warnings

use setup_engine::cards::collect_warnings;
use setup_engine::models::card::Severity;
use setup_engine::models::indicators::IndicatorSnapshot;
use setup_engine::models::levels::{Direction, EntryZone, Levels, SwingLevels};

fn swing_with_rr(risk_reward: f64) -> Levels {
    Levels::Swing(SwingLevels {
        direction: Direction::Buy,
        entry: 100.0,
        entry_zone: EntryZone { low: 99.5, high: 100.5 },
        stop_loss: 97.5,
        target_1: 100.0 + 2.5 * risk_reward,
        target_2: 110.0,
        target_3: 115.0,
        risk_reward,
        risk_percent: 2.5,
        reward_percent: 2.5 * risk_reward,
    })
}

#[test]
fn test_all_rules_fire() {
    let snapshot = IndicatorSnapshot::new("INFY", 100.0)
        .with_rsi(68.0, 60.0)
        .with_volume_vs_avg(0.7)
        .with_atr_pct(4.5);
    let levels = swing_with_rr(1.2);

    let warnings = collect_warnings(&snapshot, Some(&levels));
    let codes: Vec<&str> = warnings.iter().map(|w| w.code.as_str()).collect();
    assert_eq!(codes, vec!["low_volume", "elevated_rsi", "high_volatility", "poor_risk_reward"]);
    assert_eq!(warnings[0].severity, Severity::Medium);
    assert_eq!(warnings[2].severity, Severity::High);
    assert!(warnings.iter().all(|w| !w.mitigation.is_empty()));
}

#[test]
fn test_clean_setup_has_no_warnings() {
    let snapshot = IndicatorSnapshot::new("INFY", 100.0)
        .with_rsi(60.0, 60.0)
        .with_volume_vs_avg(1.4)
        .with_atr_pct(2.0);
    assert!(collect_warnings(&snapshot, Some(&swing_with_rr(2.0))).is_empty());
}

#[test]
fn test_boundaries_do_not_warn() {
    let snapshot = IndicatorSnapshot::new("INFY", 100.0)
        .with_rsi(65.0, 60.0)
        .with_volume_vs_avg(0.8)
        .with_atr_pct(4.0);
    assert!(collect_warnings(&snapshot, Some(&swing_with_rr(1.5))).is_empty());
    assert!(collect_warnings(&IndicatorSnapshot::new("INFY", 100.0), None).is_empty());
}
