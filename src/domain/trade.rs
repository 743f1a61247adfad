//! Trade records as supplied by the journal.
//!
//! Every field is optional on the way in. Accessors turn absence into the
//! neutral value a scorer expects (0 P&L, no quantity, no notes).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::cmp::Ordering;

use super::emotion::EmotionalState;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reference to the strategy a trade was taken under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl StrategyRef {
    /// Accepts a bare id (string or number) or an object with `id`/`name`.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let strategy = match raw {
            Value::Object(map) => StrategyRef {
                id: map.get("id").and_then(scalar_text),
                name: map.get("name").and_then(scalar_text),
            },
            other => StrategyRef {
                id: scalar_text(other),
                name: None,
            },
        };
        strategy.is_present().then_some(strategy)
    }

    pub fn is_present(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.id) || filled(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Trade {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub pnl: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_trade_date")]
    pub trade_date: Option<NaiveDate>,
    #[serde(default)]
    pub emotional_state: EmotionalState,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub notes: Option<String>,
    #[serde(default, alias = "strategies", deserialize_with = "deserialize_strategy")]
    pub strategy: Option<StrategyRef>,
}

impl Trade {
    pub fn new(trade_date: NaiveDate, pnl: f64) -> Self {
        Trade {
            trade_date: Some(trade_date),
            pnl: Some(pnl),
            ..Default::default()
        }
    }

    /// Realized P&L; absent or non-finite values count as 0.
    pub fn pnl(&self) -> f64 {
        self.pnl.filter(|p| p.is_finite()).unwrap_or(0.0)
    }

    pub fn quantity(&self) -> Option<f64> {
        self.quantity.filter(|q| q.is_finite())
    }

    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    pub fn has_strategy(&self) -> bool {
        self.strategy.as_ref().is_some_and(StrategyRef::is_present)
    }

    pub fn has_emotional_state(&self) -> bool {
        self.emotional_state.is_tagged()
    }
}

/// Total chronological order: date (undated first), then P&L, then quantity.
///
/// The tie-breaks make the order independent of input order, so sums taken
/// over a sorted slice are bit-identical for any permutation of the trades.
pub fn chronological_cmp(a: &Trade, b: &Trade) -> Ordering {
    a.trade_date
        .cmp(&b.trade_date)
        .then_with(|| a.pnl().total_cmp(&b.pnl()))
        .then_with(|| match (a.quantity(), b.quantity()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        })
}

pub fn sort_chronologically(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by(|a, b| chronological_cmp(a, b));
    sorted
}

/// Parse a trade date with `format`, falling back to RFC 3339 and ISO
/// date-time stamps so exported timestamps keep working.
pub fn parse_trade_date(raw: &str, format: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, format)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn scalar_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid number: {s:?}"))),
        Some(other) => Err(D::Error::custom(format!("invalid number: {other}"))),
    }
}

fn deserialize_trade_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_trade_date(&s, DEFAULT_DATE_FORMAT)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid trade_date: {s:?}"))),
    }
}

fn deserialize_strategy<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<StrategyRef>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(StrategyRef::from_value))
}
