//! Risk management category: drawdown, large losses and position-size drift.

use serde::Serialize;

use super::band::{Band, CategoryOutcome, FractionPolicy, Interpolation};
use super::stats::{relative_deviation_pct, safe_percentage};
use super::trade::{Trade, sort_chronologically};

/// Trades with P&L strictly below this many currency units count as large losses.
pub const DEFAULT_LARGE_LOSS_THRESHOLD: f64 = -5.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskStats {
    pub trade_count: usize,
    /// Highest cumulative P&L reached, starting from 0.
    pub peak_cumulative_pnl: f64,
    pub max_drawdown: f64,
    pub max_drawdown_percentage: f64,
    pub large_loss_count: usize,
    pub large_loss_percentage: f64,
    pub quantity_variability: f64,
}

impl RiskStats {
    pub fn compute(trades: &[Trade], large_loss_threshold: f64) -> Self {
        let ordered = sort_chronologically(trades);

        let (peak, max_drawdown) = compute_drawdown(ordered.iter().map(|t| t.pnl()));
        let max_drawdown_percentage = if peak > 0.0 {
            max_drawdown / peak * 100.0
        } else {
            0.0
        };

        let large_loss_count = trades
            .iter()
            .filter(|t| t.pnl() < large_loss_threshold)
            .count();

        let quantities: Vec<f64> = ordered.iter().filter_map(|t| t.quantity()).collect();

        RiskStats {
            trade_count: trades.len(),
            peak_cumulative_pnl: peak,
            max_drawdown,
            max_drawdown_percentage,
            large_loss_count,
            large_loss_percentage: safe_percentage(large_loss_count, trades.len()),
            quantity_variability: relative_deviation_pct(&quantities),
        }
    }
}

/// Returns `(peak, max_drawdown)` over the cumulative P&L series.
fn compute_drawdown(pnls: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut cumulative = 0.0_f64;
    let mut peak = 0.0_f64;
    let mut max_dd = 0.0_f64;

    for pnl in pnls {
        cumulative += pnl;
        if cumulative > peak {
            peak = cumulative;
        }
        let dd = peak - cumulative;
        if dd > max_dd {
            max_dd = dd;
        }
    }

    (peak, max_dd)
}

pub static RISK_BANDS: [Band<RiskStats>; 4] = [
    Band {
        name: "tight",
        matches: |s| {
            s.max_drawdown_percentage < 5.0
                && s.large_loss_percentage < 5.0
                && s.quantity_variability < 10.0
        },
        interpolation: Interpolation::Fixed(10.0),
    },
    Band {
        name: "controlled",
        matches: |s| {
            (5.0..=10.0).contains(&s.max_drawdown_percentage)
                && (5.0..=10.0).contains(&s.large_loss_percentage)
                && (10.0..=20.0).contains(&s.quantity_variability)
        },
        interpolation: Interpolation::Lerp {
            min: 8.0,
            max: 9.9,
            fraction: |s| {
                ((10.0 - s.max_drawdown_percentage) / 5.0)
                    .min((10.0 - s.large_loss_percentage) / 5.0)
                    .min((20.0 - s.quantity_variability) / 10.0)
            },
        },
    },
    Band {
        name: "moderate",
        matches: |s| {
            (10.0..=15.0).contains(&s.max_drawdown_percentage)
                && (10.0..=20.0).contains(&s.large_loss_percentage)
                && (20.0..=30.0).contains(&s.quantity_variability)
        },
        interpolation: Interpolation::Lerp {
            min: 6.0,
            max: 7.9,
            fraction: |s| {
                ((15.0 - s.max_drawdown_percentage) / 5.0)
                    .min((20.0 - s.large_loss_percentage) / 10.0)
                    .min((30.0 - s.quantity_variability) / 10.0)
            },
        },
    },
    Band {
        name: "loose",
        matches: |_| true,
        interpolation: Interpolation::Lerp {
            min: 2.0,
            max: 3.9,
            fraction: |s| {
                ((30.0 - s.max_drawdown_percentage) / 30.0)
                    .min((50.0 - s.large_loss_percentage) / 50.0)
                    .clamp(0.0, 1.0)
            },
        },
    },
];

pub fn evaluate(
    trades: &[Trade],
    large_loss_threshold: f64,
    policy: FractionPolicy,
) -> CategoryOutcome<RiskStats> {
    CategoryOutcome::from_table(
        &RISK_BANDS,
        RiskStats::compute(trades, large_loss_threshold),
        policy,
    )
}

pub fn score(trades: &[Trade], large_loss_threshold: f64, policy: FractionPolicy) -> f64 {
    evaluate(trades, large_loss_threshold, policy).score
}
