//! JSON trade file adapter.
//!
//! Accepts a top-level array of trade objects or an object wrapping one in a
//! `trades` field, the two shapes journal exports come in.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::domain::error::VRatingError;
use crate::domain::trade::Trade;
use crate::ports::trade_port::TradePort;

pub struct JsonTradeAdapter {
    path: PathBuf,
}

impl JsonTradeAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TradePort for JsonTradeAdapter {
    fn load_trades(&self) -> Result<Vec<Trade>, VRatingError> {
        let content = fs::read_to_string(&self.path).map_err(|e| VRatingError::TradeFile {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        parse_trades(&content, &self.source_name())
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn parse_trades(content: &str, source_name: &str) -> Result<Vec<Trade>, VRatingError> {
    let file_error = |reason: String| VRatingError::TradeFile {
        path: source_name.to_string(),
        reason,
    };

    let document: Value =
        serde_json::from_str(content).map_err(|e| file_error(format!("invalid JSON: {}", e)))?;

    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("trades") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(file_error(
                    "expected an object with a 'trades' array".to_string(),
                ));
            }
        },
        _ => {
            return Err(file_error(
                "expected an array of trades or an object with a 'trades' array".to_string(),
            ));
        }
    };

    let trades = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Trade>(item).map_err(|e| VRatingError::TradeParse {
                source_name: source_name.to_string(),
                record: index + 1,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(source = source_name, count = trades.len(), "parsed JSON trades");
    Ok(trades)
}
