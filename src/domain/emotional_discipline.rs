//! Emotional discipline category: share of tagged trades carrying positive
//! versus negative emotions.

use serde::Serialize;

use super::band::{Band, CategoryOutcome, FractionPolicy, Interpolation};
use super::stats::safe_percentage;
use super::trade::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalStats {
    pub trade_count: usize,
    pub tagged_trades: usize,
    pub positive_trades: usize,
    pub negative_trades: usize,
    pub positive_emotion_percentage: f64,
    pub negative_impact_percentage: f64,
}

impl EmotionalStats {
    pub fn compute(trades: &[Trade]) -> Self {
        let mut stats = EmotionalStats {
            trade_count: trades.len(),
            ..Default::default()
        };

        for state in trades.iter().map(|t| &t.emotional_state).filter(|s| s.is_tagged()) {
            stats.tagged_trades += 1;
            if state.has_positive() {
                stats.positive_trades += 1;
            }
            if state.has_negative() {
                stats.negative_trades += 1;
            }
        }

        stats.positive_emotion_percentage =
            safe_percentage(stats.positive_trades, stats.tagged_trades);
        stats.negative_impact_percentage =
            safe_percentage(stats.negative_trades, stats.tagged_trades);
        stats
    }
}

pub static EMOTIONAL_BANDS: [Band<EmotionalStats>; 4] = [
    Band {
        name: "composed",
        matches: |s| s.positive_emotion_percentage > 90.0 && s.negative_impact_percentage < 10.0,
        interpolation: Interpolation::Fixed(10.0),
    },
    Band {
        name: "mostly-composed",
        matches: |s| {
            (70.0..=90.0).contains(&s.positive_emotion_percentage)
                && (10.0..=20.0).contains(&s.negative_impact_percentage)
        },
        interpolation: Interpolation::Lerp {
            min: 8.0,
            max: 9.9,
            fraction: |s| {
                ((s.positive_emotion_percentage - 70.0) / 20.0)
                    .min((20.0 - s.negative_impact_percentage) / 10.0)
            },
        },
    },
    Band {
        name: "mixed",
        matches: |s| {
            (50.0..=70.0).contains(&s.positive_emotion_percentage)
                && (20.0..=30.0).contains(&s.negative_impact_percentage)
        },
        interpolation: Interpolation::Lerp {
            min: 6.0,
            max: 7.9,
            fraction: |s| {
                ((s.positive_emotion_percentage - 50.0) / 20.0)
                    .min((30.0 - s.negative_impact_percentage) / 10.0)
            },
        },
    },
    Band {
        name: "reactive",
        matches: |_| true,
        interpolation: Interpolation::Lerp {
            min: 2.0,
            max: 3.9,
            fraction: |s| {
                (s.positive_emotion_percentage / 10.0)
                    .min((70.0 - s.negative_impact_percentage) / 70.0)
                    .clamp(0.0, 1.0)
            },
        },
    },
];

pub fn evaluate(trades: &[Trade], policy: FractionPolicy) -> CategoryOutcome<EmotionalStats> {
    CategoryOutcome::from_table(&EMOTIONAL_BANDS, EmotionalStats::compute(trades), policy)
}

pub fn score(trades: &[Trade], policy: FractionPolicy) -> f64 {
    evaluate(trades, policy).score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emotion::EmotionalState;
    use chrono::NaiveDate;

    fn tagged(primary: &str, secondary: Option<&str>) -> Trade {
        Trade {
            emotional_state: EmotionalState::tagged(primary, secondary),
            ..Trade::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10.0)
        }
    }

    fn untagged() -> Trade {
        Trade::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 10.0)
    }

    fn band(pos: f64, neg: f64) -> (&'static str, f64) {
        let stats = EmotionalStats {
            positive_emotion_percentage: pos,
            negative_impact_percentage: neg,
            ..Default::default()
        };
        let m = crate::domain::band::evaluate(&EMOTIONAL_BANDS, &stats, FractionPolicy::Clamp);
        (m.name, m.score)
    }

    #[test]
    fn percentages_use_tagged_trades_only() {
        let trades = vec![
            tagged("CALM", None),
            tagged("fomo", Some("focused")),
            tagged("bored", None),
            untagged(),
        ];
        let s = EmotionalStats::compute(&trades);
        assert_eq!(s.trade_count, 4);
        assert_eq!(s.tagged_trades, 3);
        assert_eq!(s.positive_trades, 2);
        assert_eq!(s.negative_trades, 1);
        assert_eq!(s.positive_emotion_percentage, 66.67);
        assert_eq!(s.negative_impact_percentage, 33.33);
    }

    #[test]
    fn no_tagged_trades_gives_zero_percentages() {
        let s = EmotionalStats::compute(&[untagged(), untagged()]);
        assert_eq!(s.tagged_trades, 0);
        assert_eq!(s.positive_emotion_percentage, 0.0);
        assert_eq!(s.negative_impact_percentage, 0.0);
        assert!((score(&[untagged()], FractionPolicy::Clamp) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn composed_band() {
        assert_eq!(band(95.0, 5.0), ("composed", 10.0));
    }

    #[test]
    fn mostly_composed_band() {
        let (name, score) = band(80.0, 15.0);
        assert_eq!(name, "mostly-composed");
        assert!((score - 8.95).abs() < 1e-9);
    }

    #[test]
    fn mixed_band() {
        let (name, score) = band(60.0, 25.0);
        assert_eq!(name, "mixed");
        assert!((score - 6.95).abs() < 1e-9);
    }

    #[test]
    fn reactive_band_all_negative() {
        let trades: Vec<Trade> = (0..20)
            .map(|i| {
                if i % 2 == 0 {
                    tagged("FOMO", None)
                } else {
                    tagged("REVENGE", Some("tilt"))
                }
            })
            .collect();
        let outcome = evaluate(&trades, FractionPolicy::Clamp);
        assert_eq!(outcome.band, "reactive");
        assert_eq!(outcome.stats.negative_impact_percentage, 100.0);
        assert!((2.0..=3.9).contains(&outcome.score));
    }

    #[test]
    fn reactive_band_calm_but_below_mixed_negative_range() {
        // 80% positive with no negatives misses the 10-20% negative window
        let (name, score) = band(80.0, 0.0);
        assert_eq!(name, "reactive");
        assert!((score - 3.9).abs() < 1e-9);
    }
}
