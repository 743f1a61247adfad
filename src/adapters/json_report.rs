//! JSON report adapter.

use crate::domain::error::VRatingError;
use crate::domain::rating::{RatingBreakdown, VRatingResult};
use crate::ports::report_port::ReportPort;

/// Pretty-printed JSON: the bare result, or the full breakdown when one is
/// supplied.
pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn render(
        &self,
        result: &VRatingResult,
        breakdown: Option<&RatingBreakdown>,
    ) -> Result<String, VRatingError> {
        let rendered = match breakdown {
            Some(b) => serde_json::to_string_pretty(b),
            None => serde_json::to_string_pretty(result),
        };
        rendered.map_err(|e| VRatingError::Report {
            reason: format!("cannot serialize report: {e}"),
        })
    }
}
