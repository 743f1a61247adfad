//! Configuration validation.
//!
//! Every key is optional; a key that is present must hold a usable value.

use std::fmt::Write as _;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use crate::domain::band::FractionPolicy;
use crate::domain::error::VRatingError;
use crate::ports::config_port::{ConfigPort, parse_bool};

pub const REPORT_FORMATS: [&str; 2] = ["text", "json"];

pub fn validate_rating_config(config: &dyn ConfigPort) -> Result<(), VRatingError> {
    validate_fraction_policy(config)?;
    validate_large_loss_threshold(config)?;
    validate_date_format(config)?;
    validate_report(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> VRatingError {
    VRatingError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_fraction_policy(config: &dyn ConfigPort) -> Result<(), VRatingError> {
    if let Some(value) = config.get_string("rating", "fraction_policy") {
        value
            .parse::<FractionPolicy>()
            .map_err(|reason| invalid("rating", "fraction_policy", reason))?;
    }
    Ok(())
}

/// Parsed here rather than through `get_double` so a typo is reported instead
/// of silently falling back to the default.
pub fn parse_large_loss_threshold(raw: &str) -> Result<f64, VRatingError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        invalid(
            "rating",
            "large_loss_threshold",
            format!("'{}' is not a number", raw.trim()),
        )
    })?;
    if !value.is_finite() || value > 0.0 {
        return Err(invalid(
            "rating",
            "large_loss_threshold",
            "large_loss_threshold must be zero or negative",
        ));
    }
    Ok(value)
}

fn validate_large_loss_threshold(config: &dyn ConfigPort) -> Result<(), VRatingError> {
    if let Some(raw) = config.get_string("rating", "large_loss_threshold") {
        parse_large_loss_threshold(&raw)?;
    }
    Ok(())
}

fn validate_date_format(config: &dyn ConfigPort) -> Result<(), VRatingError> {
    let Some(format) = config.get_string("input", "date_format") else {
        return Ok(());
    };
    if format.trim().is_empty() {
        return Err(invalid("input", "date_format", "date_format must not be empty"));
    }
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid(
            "input",
            "date_format",
            format!("'{format}' is not a valid strftime format"),
        ));
    }

    // A format that cannot read back what it writes would reject every trade.
    let sample = NaiveDate::default();
    let mut rendered = String::new();
    let round_trips = write!(rendered, "{}", sample.format(&format)).is_ok()
        && NaiveDate::parse_from_str(&rendered, &format).ok() == Some(sample);
    if !round_trips {
        return Err(invalid(
            "input",
            "date_format",
            format!("'{format}' does not describe a full calendar date"),
        ));
    }
    Ok(())
}

fn validate_report(config: &dyn ConfigPort) -> Result<(), VRatingError> {
    if let Some(format) = config.get_string("report", "format") {
        let normalized = format.trim().to_lowercase();
        if !REPORT_FORMATS.contains(&normalized.as_str()) {
            return Err(invalid(
                "report",
                "format",
                format!("unknown report format '{}' (expected text or json)", format.trim()),
            ));
        }
    }
    if let Some(explain) = config.get_string("report", "explain") {
        if parse_bool(&explain).is_none() {
            return Err(invalid(
                "report",
                "explain",
                format!("'{}' is not a boolean", explain.trim()),
            ));
        }
    }
    Ok(())
}
