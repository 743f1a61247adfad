#![allow(dead_code)]

use chrono::NaiveDate;
use std::io::Write;
use vrating::domain::emotion::EmotionalState;
use vrating::domain::error::VRatingError;
pub use vrating::domain::trade::Trade;
use vrating::domain::trade::StrategyRef;
use vrating::ports::trade_port::TradePort;

/// In-memory trade source.
pub struct MockTradePort {
    pub trades: Vec<Trade>,
    pub error: Option<String>,
}

impl MockTradePort {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self {
            trades,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            trades: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl TradePort for MockTradePort {
    fn load_trades(&self) -> Result<Vec<Trade>, VRatingError> {
        match &self.error {
            Some(reason) => Err(VRatingError::TradeFile {
                path: self.source_name(),
                reason: reason.clone(),
            }),
            None => Ok(self.trades.clone()),
        }
    }

    fn source_name(&self) -> String {
        "mock".to_string()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn day(offset: usize) -> NaiveDate {
    date(2024, 1, 1) + chrono::Duration::days(offset as i64)
}

/// One trade per day starting 2024-01-01.
pub fn dated_trades(pnls: &[f64]) -> Vec<Trade> {
    pnls.iter()
        .enumerate()
        .map(|(i, &pnl)| Trade::new(day(i), pnl))
        .collect()
}

pub fn with_emotion(mut trade: Trade, primary: &str, secondary: Option<&str>) -> Trade {
    trade.emotional_state = EmotionalState::tagged(primary, secondary);
    trade
}

pub fn fully_journaled(mut trade: Trade, emotion: &str) -> Trade {
    trade.strategy = Some(StrategyRef {
        id: Some("strat-1".into()),
        name: Some("Opening range".into()),
    });
    trade.notes = Some("entry on plan, exit at target".into());
    with_emotion(trade, emotion, None)
}

/// `wins` trades of `+win` followed by `losses` trades of `-loss`.
pub fn win_loss(wins: usize, win: f64, losses: usize, loss: f64) -> Vec<Trade> {
    let mut pnls = vec![win; wins];
    pnls.extend(vec![-loss; losses]);
    dated_trades(&pnls)
}

pub fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
