//! Assembles analysis cards from classification, levels and score.

use chrono::{DateTime, Utc};

use crate::cards::quick_reject::build_quick_reject;
use crate::cards::warnings::collect_warnings;
use crate::models::card::{
    Action, AnalysisCard, AnalysisKind, CardBody, Confidence, SetupScore, TradingPlan, Verdict,
};
use crate::models::classification::{ClassificationResult, RejectReason, ScanType};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::levels::{Direction, Levels};
use crate::models::score::{Grade, ScoreResult};

/// Everything about the request a card records besides the analysis itself.
#[derive(Debug, Clone)]
pub struct CardContext<'a> {
    pub snapshot: &'a IndicatorSnapshot,
    pub kind: AnalysisKind,
    pub freshness_key: String,
    pub generated_at: DateTime<Utc>,
    /// Expiry stamped on quick rejects.
    pub quick_reject_valid_until: Option<DateTime<Utc>>,
}

pub fn action_for_grade(grade: Grade) -> Action {
    match grade {
        Grade::APlus | Grade::A | Grade::BPlus => Action::Buy,
        Grade::B => Action::Wait,
        Grade::C | Grade::D | Grade::F => Action::Skip,
    }
}

fn confidence_for_grade(grade: Grade) -> Confidence {
    match grade {
        Grade::APlus | Grade::A => Confidence::High,
        Grade::BPlus | Grade::B => Confidence::Medium,
        Grade::C | Grade::D | Grade::F => Confidence::Low,
    }
}

/// Final action: grade-driven unless the plan cannot be traded long, in which
/// case the answer is always WAIT.
pub fn decide_action(grade: Grade, levels: Option<&Levels>) -> Action {
    match levels {
        Some(levels) if levels.direction() == Direction::Buy => action_for_grade(grade),
        _ => Action::Wait,
    }
}

fn one_liner(scan_type: ScanType, score: &SetupScore, action: Action, levels: Option<&Levels>) -> String {
    let head = format!("{} setup graded {} ({}/100)", scan_type.label(), score.grade, score.total);
    match (action, levels) {
        (Action::Buy, Some(levels)) => match levels.entry() {
            Some(entry) => format!("{}: buy near {:.2}", head, entry),
            None => format!("{}: buy", head),
        },
        (Action::Wait, None) => format!("{}: levels unavailable, wait for clearer structure", head),
        (Action::Wait, Some(levels)) if levels.direction() != Direction::Buy => {
            format!("{}: no long plan for this session, wait", head)
        }
        (Action::Wait, _) => format!("{}: promising but not yet, wait for confirmation", head),
        _ => format!("{}: skip", head),
    }
}

fn quick_reject_card(ctx: &CardContext<'_>, reason: RejectReason, message: &str) -> AnalysisCard {
    AnalysisCard {
        symbol: ctx.snapshot.symbol.clone(),
        kind: ctx.kind,
        verdict: Verdict {
            action: Action::NoTrade,
            confidence: Confidence::High,
            one_liner: format!("No trade: {}", message),
        },
        setup_score: SetupScore::zero(),
        body: CardBody::QuickReject(build_quick_reject(reason, ctx.snapshot)),
        warnings: Vec::new(),
        generated_at: ctx.generated_at,
        freshness_key: ctx.freshness_key.clone(),
        valid_until: ctx.quick_reject_valid_until,
    }
}

fn full_card(
    ctx: &CardContext<'_>,
    scan_type: ScanType,
    message: &str,
    levels: Option<&Levels>,
    score: Option<&ScoreResult>,
) -> AnalysisCard {
    let setup_score = match score {
        Some(score) => SetupScore {
            total: score.total,
            grade: score.grade,
            breakdown: score.breakdown.clone(),
            strengths: score.strengths().into_iter().map(str::to_string).collect(),
            watch: score.watch_items().into_iter().map(str::to_string).collect(),
        },
        None => SetupScore::zero(),
    };

    let action = decide_action(setup_score.grade, levels);
    let confidence = if action == Action::Wait && levels.map_or(true, |l| l.direction() != Direction::Buy) {
        Confidence::Low
    } else {
        confidence_for_grade(setup_score.grade)
    };

    AnalysisCard {
        symbol: ctx.snapshot.symbol.clone(),
        kind: ctx.kind,
        verdict: Verdict {
            action,
            confidence,
            one_liner: one_liner(scan_type, &setup_score, action, levels),
        },
        setup_score,
        body: CardBody::TradingPlan(TradingPlan {
            scan_type,
            setup_message: message.to_string(),
            rubric: score.map(|s| s.rubric),
            levels: levels.cloned(),
        }),
        warnings: collect_warnings(ctx.snapshot, levels),
        generated_at: ctx.generated_at,
        freshness_key: ctx.freshness_key.clone(),
        valid_until: None,
    }
}

/// Build the card for one computation. Pure; persistence happens elsewhere.
pub fn build_card(
    ctx: &CardContext<'_>,
    classification: &ClassificationResult,
    levels: Option<&Levels>,
    score: Option<&ScoreResult>,
) -> AnalysisCard {
    match classification {
        ClassificationResult::Rejected { reason, message, .. } => quick_reject_card(ctx, *reason, message),
        ClassificationResult::Setup { scan_type, message } => full_card(ctx, *scan_type, message, levels, score),
    }
}
