//! CSV trade file adapter.
//!
//! Columns are looked up by header name, so exports may carry extra columns
//! in any order. Every column is optional; an empty cell means absent.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::domain::emotion::EmotionalState;
use crate::domain::error::VRatingError;
use crate::domain::trade::{StrategyRef, Trade, parse_trade_date};
use crate::ports::trade_port::TradePort;

pub const COLUMNS: [&str; 8] = [
    "id",
    "pnl",
    "quantity",
    "trade_date",
    "notes",
    "strategy_id",
    "strategy_name",
    "emotional_state",
];

pub struct CsvTradeAdapter {
    path: PathBuf,
    date_format: String,
}

impl CsvTradeAdapter {
    pub fn new(path: PathBuf, date_format: impl Into<String>) -> Self {
        Self {
            path,
            date_format: date_format.into(),
        }
    }
}

impl TradePort for CsvTradeAdapter {
    fn load_trades(&self) -> Result<Vec<Trade>, VRatingError> {
        let content = fs::read_to_string(&self.path).map_err(|e| VRatingError::TradeFile {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        parse_trades(&content, &self.source_name(), &self.date_format)
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse CSV `content` into trades. `source_name` only feeds error messages.
pub fn parse_trades(
    content: &str,
    source_name: &str,
    date_format: &str,
) -> Result<Vec<Trade>, VRatingError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = rdr.headers().map_err(|e| VRatingError::TradeFile {
        path: source_name.to_string(),
        reason: format!("CSV header error: {}", e),
    })?;
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_lowercase(), i))
        .collect();

    if !columns.contains_key("pnl") {
        warn!(source = source_name, "no pnl column, every trade counts as break-even");
    }
    for name in headers.iter() {
        if !COLUMNS.contains(&name.to_lowercase().as_str()) {
            debug!(source = source_name, column = name, "ignoring unknown column");
        }
    }

    let mut trades = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record_no = index + 1;
        let fail = |reason: String| VRatingError::TradeParse {
            source_name: source_name.to_string(),
            record: record_no,
            reason,
        };

        let record = result.map_err(|e| fail(format!("CSV parse error: {}", e)))?;
        let cell = |name: &str| {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .filter(|v| !v.is_empty())
        };

        let number = |name: &str| -> Result<Option<f64>, VRatingError> {
            cell(name)
                .map(|raw| {
                    raw.parse::<f64>()
                        .map_err(|_| fail(format!("invalid {} value '{}'", name, raw)))
                })
                .transpose()
        };

        let trade_date = cell("trade_date")
            .map(|raw| {
                parse_trade_date(raw, date_format).ok_or_else(|| {
                    fail(format!(
                        "invalid trade_date '{}' (expected {})",
                        raw, date_format
                    ))
                })
            })
            .transpose()?;

        let strategy = StrategyRef {
            id: cell("strategy_id").map(str::to_string),
            name: cell("strategy_name").map(str::to_string),
        };

        trades.push(Trade {
            id: cell("id").map(str::to_string),
            pnl: number("pnl")?,
            quantity: number("quantity")?,
            trade_date,
            emotional_state: cell("emotional_state")
                .map(EmotionalState::parse_str)
                .unwrap_or_default(),
            notes: cell("notes").map(str::to_string),
            strategy: strategy.is_present().then_some(strategy),
        });
    }

    debug!(source = source_name, count = trades.len(), "parsed CSV trades");
    Ok(trades)
}
