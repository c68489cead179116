//! Rubric definitions: which factors a setup is scored on and how many
//! points each reading earns.

use crate::common::math::known;
use crate::models::classification::ScanType;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::levels::Levels;
use crate::models::score::{Factor, Rubric};

/// Point allocation of a rubric. Each sums to 100.
pub struct RubricWeights;

impl RubricWeights {
    pub const MOMENTUM: [(&'static str, u32); 7] = [
        ("volume_conviction", 20),
        ("risk_reward", 20),
        ("rsi_position", 15),
        ("weekly_move", 10),
        ("upside_to_target", 15),
        ("fundamentals", 10),
        ("price_accessibility", 10),
    ];

    pub const PULLBACK: [(&'static str, u32); 7] = [
        ("ema20_proximity", 20),
        ("volume_decline", 15),
        ("rsi_cooling", 15),
        ("trend_structure", 15),
        ("risk_reward", 15),
        ("relative_strength", 10),
        ("atr_tradability", 10),
    ];

    pub fn for_rubric(rubric: Rubric) -> &'static [(&'static str, u32); 7] {
        match rubric {
            Rubric::Momentum => &Self::MOMENTUM,
            Rubric::Pullback => &Self::PULLBACK,
        }
    }

    /// Verify weights sum to 100
    pub fn verify(rubric: Rubric) -> bool {
        Self::for_rubric(rubric).iter().map(|(_, max)| max).sum::<u32>() == 100
    }
}

/// Pullbacks are scored on the pullback rubric, everything else on momentum.
pub fn rubric_for(scan_type: ScanType) -> Rubric {
    match scan_type {
        ScanType::Pullback => Rubric::Pullback,
        ScanType::APlusMomentum
        | ScanType::Breakout
        | ScanType::Momentum
        | ScanType::ConsolidationBreakout => Rubric::Momentum,
    }
}

/// Points for the first tier whose threshold `value` reaches; tiers descend.
fn tiered(value: f64, tiers: &[(f64, u32)]) -> u32 {
    tiers
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Scale a 0-1 fraction of `max`, rounding to whole points.
fn fraction_of(max: u32, fraction: f64) -> u32 {
    (fraction.clamp(0.0, 1.0) * f64::from(max)).round() as u32
}

fn risk_reward_factor(levels: Option<&Levels>, max: u32) -> Factor {
    let Some(rr) = levels.and_then(Levels::risk_reward) else {
        return Factor::missing("risk_reward", max);
    };
    let tiers = [(3.0, 1.0), (2.5, 0.8), (2.0, 0.6), (1.5, 0.4), (1.0, 0.2)];
    let fraction = tiers
        .iter()
        .find(|(threshold, _)| rr >= *threshold)
        .map(|(_, f)| *f)
        .unwrap_or(0.0);
    Factor::new(
        "risk_reward",
        Some(rr),
        fraction_of(max, fraction),
        max,
        format!("Reward/risk {:.2} to first target", rr),
    )
}

fn momentum_factors(snapshot: &IndicatorSnapshot, levels: Option<&Levels>) -> Vec<Factor> {
    let price = known(snapshot.price).filter(|p| *p > 0.0);
    let mut factors = Vec::with_capacity(7);

    factors.push(match known(snapshot.volume_vs_avg) {
        Some(ratio) => Factor::new(
            "volume_conviction",
            Some(ratio),
            tiered(ratio, &[(2.0, 20), (1.5, 16), (1.2, 12), (1.0, 8), (0.8, 4)]),
            20,
            format!("Volume at {:.2}x average", ratio),
        ),
        None => Factor::missing("volume_conviction", 20),
    });

    factors.push(risk_reward_factor(levels, 20));

    factors.push(match known(snapshot.rsi) {
        Some(rsi) => {
            let points = if (55.0..=65.0).contains(&rsi) {
                15
            } else if (50.0..55.0).contains(&rsi) || (65.0..=70.0).contains(&rsi) {
                10
            } else if (45.0..50.0).contains(&rsi) {
                6
            } else {
                3
            };
            Factor::new("rsi_position", Some(rsi), points, 15, format!("Daily RSI {:.1}", rsi))
        }
        None => Factor::missing("rsi_position", 15),
    });

    factors.push(match known(snapshot.weekly_change_pct) {
        Some(change) => {
            let points = if change < 0.0 {
                0
            } else if change < 2.0 {
                6
            } else if change <= 8.0 {
                10
            } else if change <= 12.0 {
                5
            } else {
                2
            };
            Factor::new("weekly_move", Some(change), points, 10, format!("Week change {:+.1}%", change))
        }
        None => Factor::missing("weekly_move", 10),
    });

    let upside = match (price, levels.and_then(Levels::first_target)) {
        (Some(price), Some(target)) => Some((target - price) / price * 100.0),
        _ => None,
    };
    factors.push(match upside {
        Some(upside) => Factor::new(
            "upside_to_target",
            Some(upside),
            if upside <= 0.0 {
                0
            } else {
                tiered(upside, &[(10.0, 15), (6.0, 12), (4.0, 9), (2.0, 5), (0.0, 2)])
            },
            15,
            format!("{:.1}% to first target", upside),
        ),
        None => Factor::missing("upside_to_target", 15),
    });

    factors.push(match known(snapshot.institutional_score) {
        Some(quality) => Factor::new(
            "fundamentals",
            Some(quality),
            fraction_of(10, quality / 100.0),
            10,
            format!("Fundamentals/institutional quality {:.0}/100", quality),
        ),
        None => Factor::missing("fundamentals", 10),
    });

    factors.push(match price {
        Some(price) => Factor::new(
            "price_accessibility",
            Some(price),
            if price <= 500.0 {
                10
            } else if price <= 2000.0 {
                8
            } else if price <= 5000.0 {
                5
            } else {
                2
            },
            10,
            format!("Share price {:.2}", price),
        ),
        None => Factor::missing("price_accessibility", 10),
    });

    factors
}

fn pullback_factors(snapshot: &IndicatorSnapshot, levels: Option<&Levels>) -> Vec<Factor> {
    let price = known(snapshot.price).filter(|p| *p > 0.0);
    let ema20 = known(snapshot.ema20).filter(|v| *v > 0.0);
    let ema50 = known(snapshot.ema50);
    let sma200 = known(snapshot.sma200);
    let mut factors = Vec::with_capacity(7);

    factors.push(match (price, ema20) {
        (Some(price), Some(ema20)) => {
            let distance = ((price - ema20) / ema20 * 100.0).abs();
            let points = if distance <= 1.0 {
                20
            } else if distance <= 2.0 {
                16
            } else if distance <= 3.0 {
                12
            } else if distance <= 5.0 {
                6
            } else {
                0
            };
            Factor::new("ema20_proximity", Some(distance), points, 20, format!("{:.1}% from EMA20", distance))
        }
        _ => Factor::missing("ema20_proximity", 20),
    });

    // Lighter volume on the pullback is the healthy case.
    factors.push(match known(snapshot.volume_vs_avg) {
        Some(ratio) => {
            let points = if ratio <= 0.6 {
                15
            } else if ratio <= 0.8 {
                12
            } else if ratio <= 1.0 {
                8
            } else if ratio <= 1.3 {
                4
            } else {
                0
            };
            Factor::new("volume_decline", Some(ratio), points, 15, format!("Pullback volume {:.2}x average", ratio))
        }
        None => Factor::missing("volume_decline", 15),
    });

    factors.push(match known(snapshot.rsi) {
        Some(rsi) => {
            let points = if (40.0..=55.0).contains(&rsi) {
                15
            } else if rsi > 55.0 && rsi <= 60.0 {
                10
            } else if (35.0..40.0).contains(&rsi) {
                8
            } else if rsi > 60.0 && rsi <= 65.0 {
                5
            } else {
                0
            };
            Factor::new("rsi_cooling", Some(rsi), points, 15, format!("Daily RSI {:.1}", rsi))
        }
        None => Factor::missing("rsi_cooling", 15),
    });

    let checks = [
        price.zip(ema50).map(|(p, e50)| p > e50),
        ema50.zip(sma200).map(|(e50, s200)| e50 > s200),
        ema20.zip(ema50).map(|(e20, e50)| e20 > e50),
    ];
    factors.push(if checks.iter().all(Option::is_none) {
        Factor::missing("trend_structure", 15)
    } else {
        let aligned = checks.iter().filter(|c| **c == Some(true)).count() as u32;
        Factor::new(
            "trend_structure",
            Some(f64::from(aligned)),
            aligned * 5,
            15,
            format!("{}/3 trend alignment checks hold", aligned),
        )
    });

    factors.push(risk_reward_factor(levels, 15));

    factors.push(match known(snapshot.relative_strength) {
        Some(rs) => Factor::new(
            "relative_strength",
            Some(rs),
            tiered(rs, &[(10.0, 10), (5.0, 8), (0.0, 5), (-5.0, 2)]),
            10,
            format!("Relative strength {:+.1}% vs index", rs),
        ),
        None => Factor::missing("relative_strength", 10),
    });

    factors.push(match known(snapshot.atr_pct) {
        Some(atr_pct) => {
            let points = if (1.5..=3.0).contains(&atr_pct) {
                10
            } else if (1.0..1.5).contains(&atr_pct) || (atr_pct > 3.0 && atr_pct <= 4.0) {
                6
            } else if atr_pct < 1.0 {
                3
            } else {
                0
            };
            Factor::new("atr_tradability", Some(atr_pct), points, 10, format!("ATR {:.2}% of price", atr_pct))
        }
        None => Factor::missing("atr_tradability", 10),
    });

    factors
}

/// Build the factor list for one rubric. Only the selected rubric is evaluated.
pub fn build_factors(rubric: Rubric, snapshot: &IndicatorSnapshot, levels: Option<&Levels>) -> Vec<Factor> {
    match rubric {
        Rubric::Momentum => momentum_factors(snapshot, levels),
        Rubric::Pullback => pullback_factors(snapshot, levels),
    }
}
