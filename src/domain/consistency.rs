//! Consistency category: P&L dispersion and losing streaks.

use serde::Serialize;

use super::band::{Band, CategoryOutcome, FractionPolicy, Interpolation};
use super::stats::{mean, relative_deviation_pct, standard_deviation};
use super::trade::{Trade, sort_chronologically};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyStats {
    pub trade_count: usize,
    pub mean_pnl: f64,
    pub pnl_std_dev: f64,
    /// Standard deviation of P&L relative to the absolute mean, in percent.
    pub pl_std_dev_percentage: f64,
    pub longest_loss_streak: usize,
}

impl ConsistencyStats {
    pub fn compute(trades: &[Trade]) -> Self {
        let pnls: Vec<f64> = sort_chronologically(trades)
            .into_iter()
            .map(Trade::pnl)
            .collect();

        ConsistencyStats {
            trade_count: pnls.len(),
            mean_pnl: mean(&pnls),
            pnl_std_dev: standard_deviation(&pnls),
            pl_std_dev_percentage: relative_deviation_pct(&pnls),
            longest_loss_streak: longest_loss_streak(&pnls),
        }
    }

    fn streak(&self) -> f64 {
        self.longest_loss_streak as f64
    }
}

fn longest_loss_streak(pnls: &[f64]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for &pnl in pnls {
        if pnl < 0.0 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

pub static CONSISTENCY_BANDS: [Band<ConsistencyStats>; 4] = [
    Band {
        name: "steady",
        matches: |s| s.pl_std_dev_percentage < 5.0 && s.longest_loss_streak <= 3,
        interpolation: Interpolation::Fixed(10.0),
    },
    Band {
        name: "stable",
        matches: |s| {
            (5.0..=10.0).contains(&s.pl_std_dev_percentage)
                && (4..=5).contains(&s.longest_loss_streak)
        },
        interpolation: Interpolation::Lerp {
            min: 8.0,
            max: 9.9,
            fraction: |s| ((10.0 - s.pl_std_dev_percentage) / 5.0).min(5.0 - s.streak()),
        },
    },
    Band {
        name: "uneven",
        matches: |s| {
            (10.0..=15.0).contains(&s.pl_std_dev_percentage)
                && (6..=7).contains(&s.longest_loss_streak)
        },
        interpolation: Interpolation::Lerp {
            min: 6.0,
            max: 7.9,
            fraction: |s| ((15.0 - s.pl_std_dev_percentage) / 5.0).min(7.0 - s.streak()),
        },
    },
    Band {
        name: "erratic",
        matches: |_| true,
        interpolation: Interpolation::Lerp {
            min: 2.0,
            max: 3.9,
            fraction: |s| {
                ((25.0 - s.pl_std_dev_percentage) / 25.0)
                    .min((10.0 - s.streak()) / 10.0)
                    .clamp(0.0, 1.0)
            },
        },
    },
];

pub fn evaluate(trades: &[Trade], policy: FractionPolicy) -> CategoryOutcome<ConsistencyStats> {
    CategoryOutcome::from_table(&CONSISTENCY_BANDS, ConsistencyStats::compute(trades), policy)
}

pub fn score(trades: &[Trade], policy: FractionPolicy) -> f64 {
    evaluate(trades, policy).score
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(i: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i)
    }

    fn trades(pnls: &[f64]) -> Vec<Trade> {
        pnls.iter()
            .enumerate()
            .map(|(i, &pnl)| Trade::new(day(i as i64), pnl))
            .collect()
    }

    fn band(sd: f64, streak: usize) -> (&'static str, f64) {
        let stats = ConsistencyStats {
            pl_std_dev_percentage: sd,
            longest_loss_streak: streak,
            ..Default::default()
        };
        let m = crate::domain::band::evaluate(&CONSISTENCY_BANDS, &stats, FractionPolicy::Clamp);
        (m.name, m.score)
    }

    #[test]
    fn loss_streak_counts_consecutive_losses() {
        assert_eq!(longest_loss_streak(&[-1.0, -2.0, 3.0, -1.0, -1.0, -1.0, 0.0, -5.0]), 3);
        assert_eq!(longest_loss_streak(&[1.0, 2.0]), 0);
        assert_eq!(longest_loss_streak(&[]), 0);
    }

    #[test]
    fn breakeven_trade_breaks_streak() {
        assert_eq!(longest_loss_streak(&[-1.0, 0.0, -1.0]), 1);
    }

    #[test]
    fn streak_follows_trade_dates() {
        let trades = vec![
            Trade::new(day(0), -10.0),
            Trade::new(day(2), -10.0),
            Trade::new(day(1), 50.0),
            Trade::new(day(3), -10.0),
        ];
        // chronological: -10, +50, -10, -10
        let s = ConsistencyStats::compute(&trades);
        assert_eq!(s.longest_loss_streak, 2);
    }

    #[test]
    fn std_dev_percentage_relative_to_mean() {
        let s = ConsistencyStats::compute(&trades(&[90.0, 110.0]));
        assert!((s.mean_pnl - 100.0).abs() < 1e-9);
        assert!((s.pnl_std_dev - 10.0).abs() < 1e-9);
        assert!((s.pl_std_dev_percentage - 10.0).abs() < 1e-9);
    }

    #[test]
    fn std_dev_percentage_zero_mean() {
        let s = ConsistencyStats::compute(&trades(&[50.0, -50.0]));
        assert_eq!(s.pl_std_dev_percentage, 0.0);
    }

    #[test]
    fn steady_band() {
        assert_eq!(band(2.0, 3), ("steady", 10.0));
    }

    #[test]
    fn stable_band() {
        let (name, score) = band(7.5, 4);
        assert_eq!(name, "stable");
        // min(0.5, 1.0)
        assert!((score - 8.95).abs() < 1e-9);

        let (_, score) = band(5.0, 5);
        // min(1.0, 0.0)
        assert!((score - 8.0).abs() < 1e-9);
    }

    #[test]
    fn uneven_band() {
        let (name, score) = band(10.0, 6);
        assert_eq!(name, "uneven");
        assert!((score - 7.9).abs() < 1e-9);
    }

    #[test]
    fn erratic_band() {
        let (name, score) = band(12.5, 5);
        assert_eq!(name, "erratic");
        // min(0.5, 0.5)
        assert!((score - 2.95).abs() < 1e-9);

        let (_, floor) = band(400.0, 12);
        assert!((floor - 2.0).abs() < 1e-9);
    }

    #[test]
    fn identical_winners_are_steady() {
        assert_eq!(score(&trades(&[25.0; 8]), FractionPolicy::Clamp), 10.0);
    }
}
