//! Banded piecewise-linear scoring shared by every category scorer.
//!
//! A band table is an ordered slice of `(predicate, interpolation)` entries
//! over a category's derived statistics. The first band whose predicate holds
//! decides the score; tables end in a catch-all band.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::stats::lerp;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// What to do with an interpolation fraction that falls outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionPolicy {
    /// Clamp to `[0, 1]`, keeping every score inside its band's range.
    #[default]
    Clamp,
    /// Pass through unchanged; a score may leave its band's range before the
    /// final `[0, 10]` clamp.
    Literal,
}

impl FractionPolicy {
    pub fn apply(self, fraction: f64) -> f64 {
        match self {
            FractionPolicy::Clamp => fraction.clamp(0.0, 1.0),
            FractionPolicy::Literal => fraction,
        }
    }
}

impl fmt::Display for FractionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FractionPolicy::Clamp => write!(f, "clamp"),
            FractionPolicy::Literal => write!(f, "literal"),
        }
    }
}

impl FromStr for FractionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clamp" => Ok(FractionPolicy::Clamp),
            "literal" => Ok(FractionPolicy::Literal),
            other => Err(format!(
                "unknown fraction policy '{other}' (expected clamp or literal)"
            )),
        }
    }
}

pub enum Interpolation<S> {
    Fixed(f64),
    /// `lerp(min, max, fraction(stats))`, fraction subject to the policy.
    Lerp {
        min: f64,
        max: f64,
        fraction: fn(&S) -> f64,
    },
    /// `min(base + slope * input(stats), ceiling)`.
    Ramp {
        base: f64,
        slope: f64,
        input: fn(&S) -> f64,
        ceiling: f64,
    },
}

pub struct Band<S> {
    pub name: &'static str,
    pub matches: fn(&S) -> bool,
    pub interpolation: Interpolation<S>,
}

impl<S> Band<S> {
    /// Raw score of this band, before the final `[0, 10]` clamp.
    pub fn score(&self, stats: &S, policy: FractionPolicy) -> f64 {
        match self.interpolation {
            Interpolation::Fixed(value) => value,
            Interpolation::Lerp { min, max, fraction } => {
                lerp(min, max, policy.apply(fraction(stats)))
            }
            Interpolation::Ramp {
                base,
                slope,
                input,
                ceiling,
            } => (base + slope * input(stats)).min(ceiling),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandMatch {
    pub name: &'static str,
    pub score: f64,
}

/// Evaluate `bands` top to bottom; the first match wins.
pub fn evaluate<S>(bands: &[Band<S>], stats: &S, policy: FractionPolicy) -> BandMatch {
    bands
        .iter()
        .find(|band| (band.matches)(stats))
        .map(|band| BandMatch {
            name: band.name,
            score: clamp_score(band.score(stats, policy)),
        })
        .unwrap_or(BandMatch {
            name: "none",
            score: SCORE_MIN,
        })
}

/// Clamp to `[0, 10]`; NaN becomes 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// A scored category together with the statistics that produced the score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOutcome<S> {
    pub score: f64,
    pub band: &'static str,
    pub stats: S,
}

impl<S> CategoryOutcome<S> {
    pub fn from_table(bands: &[Band<S>], stats: S, policy: FractionPolicy) -> Self {
        let matched = evaluate(bands, &stats, policy);
        CategoryOutcome {
            score: matched.score,
            band: matched.name,
            stats,
        }
    }
}
