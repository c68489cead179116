//! Unit tests for setup classification

use setup_engine::models::classification::{RejectReason, ScanType};
use setup_engine::models::indicators::IndicatorSnapshot;
use setup_engine::signals::{classify, SetupClassifier};

/// Healthy uptrend that clears every rejection gate; callers move price and
/// the moving averages to land on a specific pattern.
fn create_test_snapshot(price: f64) -> IndicatorSnapshot {
    IndicatorSnapshot::new("INFY", price)
        .with_moving_averages(145.0, 140.0, 120.0)
        .with_rsi(60.0, 65.0)
        .with_high_52w(200.0)
}

#[test]
fn test_a_plus_momentum_near_high() {
    let snapshot = create_test_snapshot(199.5);
    assert_eq!(classify(&snapshot).scan_type(), Some(ScanType::APlusMomentum));
}

#[test]
fn test_breakout_within_seven_percent_of_high() {
    let snapshot = create_test_snapshot(190.0);
    let result = classify(&snapshot);
    assert_eq!(result.scan_type(), Some(ScanType::Breakout));
    assert!(result.message().contains("52-week high"));
}

#[test]
fn test_momentum_above_all_averages() {
    let snapshot = create_test_snapshot(150.0);
    assert_eq!(classify(&snapshot).scan_type(), Some(ScanType::Momentum));
}

#[test]
fn test_pullback_to_ema20() {
    let snapshot = IndicatorSnapshot::new("INFY", 148.0)
        .with_moving_averages(150.0, 140.0, 120.0)
        .with_rsi(50.0, 60.0)
        .with_high_52w(200.0);
    assert_eq!(classify(&snapshot).scan_type(), Some(ScanType::Pullback));
}

#[test]
fn test_consolidation_breakout_fallback() {
    let snapshot = IndicatorSnapshot::new("INFY", 130.0)
        .with_moving_averages(120.0, 125.0, 110.0)
        .with_rsi(50.0, 60.0)
        .with_high_52w(200.0);
    assert_eq!(classify(&snapshot).scan_type(), Some(ScanType::ConsolidationBreakout));
}

#[test]
fn test_unclear_without_structure() {
    let result = classify(&IndicatorSnapshot::new("INFY", 100.0));
    assert!(!result.is_setup());
    assert_eq!(result.reject_reason(), Some(RejectReason::Unclear));
}

#[test]
fn test_first_failing_gate_wins() {
    let snapshot = IndicatorSnapshot::new("INFY", 90.0)
        .with_moving_averages(95.0, 98.0, 100.0)
        .with_rsi(30.0, 80.0);
    assert_eq!(classify(&snapshot).reject_reason(), Some(RejectReason::Below200Sma));

    let snapshot = IndicatorSnapshot::new("INFY", 110.0)
        .with_moving_averages(115.0, 112.0, 100.0)
        .with_rsi(30.0, 80.0);
    assert_eq!(classify(&snapshot).reject_reason(), Some(RejectReason::WeakMomentum));

    let snapshot = IndicatorSnapshot::new("INFY", 150.0)
        .with_moving_averages(145.0, 140.0, 120.0)
        .with_rsi(75.0, 80.0);
    assert_eq!(classify(&snapshot).reject_reason(), Some(RejectReason::Overbought));
}

#[test]
fn test_missing_price_is_insufficient_data() {
    let snapshot = IndicatorSnapshot {
        symbol: "INFY".to_string(),
        sma200: Some(100.0),
        ..IndicatorSnapshot::default()
    };
    assert_eq!(classify(&snapshot).reject_reason(), Some(RejectReason::InsufficientData));
}

#[test]
fn test_classification_is_deterministic() {
    let snapshot = create_test_snapshot(150.0);
    assert_eq!(SetupClassifier::classify(&snapshot), SetupClassifier::classify(&snapshot));
}
