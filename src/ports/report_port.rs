//! Report generation port trait.

use std::fs;
use std::path::Path;

use crate::domain::error::VRatingError;
use crate::domain::rating::{RatingBreakdown, VRatingResult};

/// Port for rendering rating reports.
pub trait ReportPort {
    fn render(
        &self,
        result: &VRatingResult,
        breakdown: Option<&RatingBreakdown>,
    ) -> Result<String, VRatingError>;

    /// Default implementation: renders, then writes the report to `output_path`.
    fn write(
        &self,
        result: &VRatingResult,
        breakdown: Option<&RatingBreakdown>,
        output_path: &Path,
    ) -> Result<(), VRatingError> {
        let report = self.render(result, breakdown)?;
        fs::write(output_path, report)?;
        Ok(())
    }
}
