//! Trade source port trait.

use crate::domain::error::VRatingError;
use crate::domain::trade::Trade;

pub trait TradePort {
    /// Load every trade from the source, in file order.
    fn load_trades(&self) -> Result<Vec<Trade>, VRatingError>;

    /// Human-readable name used in log lines and error messages.
    fn source_name(&self) -> String;
}
