//! Journaling adherence category: how completely trades are annotated.

use serde::Serialize;

use super::band::{Band, CategoryOutcome, FractionPolicy, Interpolation, clamp_score};
use super::stats::safe_percentage;
use super::trade::Trade;

/// Added after the band lookup when every trade carries an emotional state.
pub const FULL_EMOTION_BONUS: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalingStats {
    pub trade_count: usize,
    pub strategy_usage: f64,
    pub notes_usage: f64,
    pub emotion_usage: f64,
    /// Mean of the three usage percentages.
    pub completeness: f64,
    pub full_emotion_coverage: bool,
}

impl JournalingStats {
    pub fn compute(trades: &[Trade]) -> Self {
        let total = trades.len();
        let count = |pred: fn(&Trade) -> bool| trades.iter().filter(|t| pred(t)).count();

        let strategy_usage = safe_percentage(count(Trade::has_strategy), total);
        let notes_usage = safe_percentage(count(Trade::has_notes), total);
        let emotion_usage = safe_percentage(count(Trade::has_emotional_state), total);

        JournalingStats {
            trade_count: total,
            strategy_usage,
            notes_usage,
            emotion_usage,
            completeness: (strategy_usage + notes_usage + emotion_usage) / 3.0,
            full_emotion_coverage: emotion_usage == 100.0,
        }
    }
}

pub static JOURNALING_BANDS: [Band<JournalingStats>; 5] = [
    Band {
        name: "thorough",
        matches: |s| s.completeness > 95.0,
        interpolation: Interpolation::Fixed(10.0),
    },
    Band {
        name: "detailed",
        matches: |s| (80.0..=95.0).contains(&s.completeness),
        interpolation: Interpolation::Lerp {
            min: 8.0,
            max: 9.9,
            fraction: |s| (s.completeness - 80.0) / 15.0,
        },
    },
    Band {
        name: "regular",
        matches: |s| (60.0..=80.0).contains(&s.completeness),
        interpolation: Interpolation::Lerp {
            min: 6.0,
            max: 7.9,
            fraction: |s| (s.completeness - 60.0) / 20.0,
        },
    },
    Band {
        name: "partial",
        matches: |s| (40.0..=60.0).contains(&s.completeness),
        interpolation: Interpolation::Lerp {
            min: 4.0,
            max: 5.9,
            fraction: |s| (s.completeness - 40.0) / 20.0,
        },
    },
    Band {
        name: "sparse",
        matches: |_| true,
        interpolation: Interpolation::Lerp {
            min: 2.0,
            max: 3.9,
            fraction: |s| (s.completeness / 20.0).clamp(0.0, 1.0),
        },
    },
];

pub fn evaluate(trades: &[Trade], policy: FractionPolicy) -> CategoryOutcome<JournalingStats> {
    let mut outcome =
        CategoryOutcome::from_table(&JOURNALING_BANDS, JournalingStats::compute(trades), policy);
    if outcome.stats.full_emotion_coverage {
        outcome.score = clamp_score(outcome.score + FULL_EMOTION_BONUS);
    }
    outcome
}

pub fn score(trades: &[Trade], policy: FractionPolicy) -> f64 {
    evaluate(trades, policy).score
}
