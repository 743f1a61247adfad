//! Profitability category: net P&L percentage and win rate.

use serde::Serialize;

use super::band::{Band, CategoryOutcome, FractionPolicy, Interpolation};
use super::stats::safe_percentage;
use super::trade::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityStats {
    pub trade_count: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    pub total_profit: f64,
    pub total_loss: f64,
    /// `(total_profit - total_loss) / trade_count * 100`.
    pub net_pl_percentage: f64,
    pub win_rate: f64,
}

impl ProfitabilityStats {
    pub fn compute(trades: &[Trade]) -> Self {
        let mut stats = ProfitabilityStats {
            trade_count: trades.len(),
            ..Default::default()
        };

        for trade in trades {
            let pnl = trade.pnl();
            if pnl > 0.0 {
                stats.winning_trades += 1;
                stats.total_profit += pnl;
            } else if pnl < 0.0 {
                stats.losing_trades += 1;
                stats.total_loss += pnl.abs();
            } else {
                stats.breakeven_trades += 1;
            }
        }

        if stats.trade_count > 0 {
            stats.net_pl_percentage =
                (stats.total_profit - stats.total_loss) / stats.trade_count as f64 * 100.0;
        }
        stats.win_rate = safe_percentage(stats.winning_trades, stats.trade_count);
        stats
    }
}

pub static PROFITABILITY_BANDS: [Band<ProfitabilityStats>; 6] = [
    Band {
        name: "exceptional",
        matches: |s| s.net_pl_percentage > 50.0 && s.win_rate > 70.0,
        interpolation: Interpolation::Fixed(10.0),
    },
    Band {
        name: "strong",
        matches: |s| s.net_pl_percentage >= 30.0 && s.win_rate >= 60.0,
        interpolation: Interpolation::Lerp {
            min: 8.0,
            max: 9.9,
            fraction: |s| ((s.net_pl_percentage - 30.0) / 20.0).min((s.win_rate - 60.0) / 10.0),
        },
    },
    Band {
        name: "solid",
        matches: |s| s.net_pl_percentage >= 10.0 && s.win_rate >= 50.0,
        interpolation: Interpolation::Ramp {
            base: 6.0,
            slope: 0.1,
            input: |s| s.net_pl_percentage - 10.0,
            ceiling: 7.9,
        },
    },
    Band {
        name: "break-even",
        matches: |s| {
            (0.0..=10.0).contains(&s.net_pl_percentage) || (40.0..50.0).contains(&s.win_rate)
        },
        interpolation: Interpolation::Lerp {
            min: 4.0,
            max: 5.9,
            fraction: |s| (s.net_pl_percentage / 10.0).min((s.win_rate - 40.0) / 10.0),
        },
    },
    Band {
        name: "struggling",
        matches: |s| {
            (-10.0..0.0).contains(&s.net_pl_percentage) || (30.0..40.0).contains(&s.win_rate)
        },
        interpolation: Interpolation::Lerp {
            min: 2.0,
            max: 3.9,
            fraction: |s| ((s.net_pl_percentage + 10.0) / 10.0).min((s.win_rate - 30.0) / 10.0),
        },
    },
    Band {
        name: "losing",
        matches: |_| true,
        interpolation: Interpolation::Lerp {
            min: 1.0,
            max: 1.9,
            fraction: |s| (s.net_pl_percentage / -10.0).clamp(0.0, 1.0),
        },
    },
];

pub fn evaluate(trades: &[Trade], policy: FractionPolicy) -> CategoryOutcome<ProfitabilityStats> {
    CategoryOutcome::from_table(&PROFITABILITY_BANDS, ProfitabilityStats::compute(trades), policy)
}

pub fn score(trades: &[Trade], policy: FractionPolicy) -> f64 {
    evaluate(trades, policy).score
}
