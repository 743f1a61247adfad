//! Weighted aggregation of the five category scores into a VRating.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::band::{CategoryOutcome, FractionPolicy, clamp_score};
use super::consistency::{self, ConsistencyStats};
use super::emotional_discipline::{self, EmotionalStats};
use super::journaling::{self, JournalingStats};
use super::profitability::{self, ProfitabilityStats};
use super::risk::{self, DEFAULT_LARGE_LOSS_THRESHOLD, RiskStats};
use super::stats::round2;
use super::trade::{Trade, chronological_cmp};

/// Tunables that change how a rating is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingConfig {
    pub fraction_policy: FractionPolicy,
    pub large_loss_threshold: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            fraction_policy: FractionPolicy::Clamp,
            large_loss_threshold: DEFAULT_LARGE_LOSS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights {
    pub profitability: f64,
    pub risk_management: f64,
    pub consistency: f64,
    pub emotional_discipline: f64,
    pub journaling_adherence: f64,
}

pub const CATEGORY_WEIGHTS: CategoryWeights = CategoryWeights {
    profitability: 0.30,
    risk_management: 0.25,
    consistency: 0.20,
    emotional_discipline: 0.15,
    journaling_adherence: 0.10,
};

impl CategoryWeights {
    pub fn weighted_sum(&self, scores: &CategoryScores) -> f64 {
        self.profitability * scores.profitability
            + self.risk_management * scores.risk_management
            + self.consistency * scores.consistency
            + self.emotional_discipline * scores.emotional_discipline
            + self.journaling_adherence * scores.journaling_adherence
    }

    /// `(name, weight)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("profitability", self.profitability),
            ("riskManagement", self.risk_management),
            ("consistency", self.consistency),
            ("emotionalDiscipline", self.emotional_discipline),
            ("journalingAdherence", self.journaling_adherence),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub profitability: f64,
    pub risk_management: f64,
    pub consistency: f64,
    pub emotional_discipline: f64,
    pub journaling_adherence: f64,
}

impl CategoryScores {
    pub fn rounded(&self) -> Self {
        Self {
            profitability: round2(self.profitability),
            risk_management: round2(self.risk_management),
            consistency: round2(self.consistency),
            emotional_discipline: round2(self.emotional_discipline),
            journaling_adherence: round2(self.journaling_adherence),
        }
    }

    /// Scores in the same order as [`CategoryWeights::entries`].
    pub fn values(&self) -> [f64; 5] {
        [
            self.profitability,
            self.risk_management,
            self.consistency,
            self.emotional_discipline,
            self.journaling_adherence,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VRatingResult {
    pub overall_rating: f64,
    pub category_scores: CategoryScores,
    pub trade_count: usize,
}

impl VRatingResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub profitability: CategoryOutcome<ProfitabilityStats>,
    pub risk_management: CategoryOutcome<RiskStats>,
    pub consistency: CategoryOutcome<ConsistencyStats>,
    pub emotional_discipline: CategoryOutcome<EmotionalStats>,
    pub journaling_adherence: CategoryOutcome<JournalingStats>,
}

impl CategoryBreakdown {
    fn raw_scores(&self) -> CategoryScores {
        CategoryScores {
            profitability: self.profitability.score,
            risk_management: self.risk_management.score,
            consistency: self.consistency.score,
            emotional_discipline: self.emotional_discipline.score,
            journaling_adherence: self.journaling_adherence.score,
        }
    }

    /// Matched band names in the same order as [`CategoryWeights::entries`].
    pub fn bands(&self) -> [&'static str; 5] {
        [
            self.profitability.band,
            self.risk_management.band,
            self.consistency.band,
            self.emotional_discipline.band,
            self.journaling_adherence.band,
        ]
    }
}

/// A result together with everything that explains it.
///
/// `categories` is `None` for an empty trade collection, where no scorer runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBreakdown {
    pub result: VRatingResult,
    pub config: RatingConfig,
    pub categories: Option<CategoryBreakdown>,
}

/// Stateless rating engine. Identical input always yields identical output,
/// regardless of the order trades are supplied in.
#[derive(Debug, Clone, Copy, Default)]
pub struct VRatingEngine {
    config: RatingConfig,
}

impl VRatingEngine {
    pub fn new(config: RatingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    pub fn rate(&self, trades: &[Trade]) -> VRatingResult {
        self.rate_with_breakdown(trades).result
    }

    pub fn rate_with_breakdown(&self, trades: &[Trade]) -> RatingBreakdown {
        if trades.is_empty() {
            debug!("no trades supplied, returning an all-zero rating");
            return RatingBreakdown {
                result: VRatingResult::empty(),
                config: self.config,
                categories: None,
            };
        }

        let mut working = trades.to_vec();
        working.sort_by(chronological_cmp);

        let policy = self.config.fraction_policy;
        let categories = CategoryBreakdown {
            profitability: profitability::evaluate(&working, policy),
            risk_management: risk::evaluate(&working, self.config.large_loss_threshold, policy),
            consistency: consistency::evaluate(&working, policy),
            emotional_discipline: emotional_discipline::evaluate(&working, policy),
            journaling_adherence: journaling::evaluate(&working, policy),
        };

        let raw = categories.raw_scores();
        for ((name, _), (score, band)) in CATEGORY_WEIGHTS
            .entries()
            .iter()
            .zip(raw.values().iter().zip(categories.bands()))
        {
            debug!(category = name, band, score, "category scored");
        }

        let overall = clamp_score(round2(CATEGORY_WEIGHTS.weighted_sum(&raw)));
        debug!(trades = working.len(), overall, "rating computed");

        RatingBreakdown {
            result: VRatingResult {
                overall_rating: overall,
                category_scores: raw.rounded(),
                trade_count: working.len(),
            },
            config: self.config,
            categories: Some(categories),
        }
    }
}

/// Rate `trades` with the default configuration.
pub fn calculate_vrating(trades: &[Trade]) -> VRatingResult {
    VRatingEngine::default().rate(trades)
}
