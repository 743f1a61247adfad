//! Plain-text console report.

use serde::Serialize;
use serde_json::Value;

use crate::domain::band::CategoryOutcome;
use crate::domain::error::VRatingError;
use crate::domain::rating::{CATEGORY_WEIGHTS, RatingBreakdown, VRatingResult};
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

const TITLES: [&str; 5] = [
    "Profitability",
    "Risk Management",
    "Consistency",
    "Emotional Discipline",
    "Journaling Adherence",
];

impl ReportPort for TextReportAdapter {
    fn render(
        &self,
        result: &VRatingResult,
        breakdown: Option<&RatingBreakdown>,
    ) -> Result<String, VRatingError> {
        let mut output = String::new();
        let categories = breakdown.and_then(|b| b.categories.as_ref());

        output.push_str("VRating Report\n");
        output.push_str("==============\n\n");
        output.push_str(&format!(
            "{:<22} {:>5.2} / 10\n",
            "Overall Rating", result.overall_rating
        ));
        output.push_str(&format!("{:<22} {:>5}\n", "Trades", result.trade_count));
        if let Some(b) = breakdown {
            output.push_str(&format!(
                "{:<22} {:>5}\n",
                "Fraction Policy", b.config.fraction_policy
            ));
        }
        output.push('\n');

        output.push_str(&format!(
            "{:<22} {:>6} {:>6}",
            "Category", "Weight", "Score"
        ));
        if categories.is_some() {
            output.push_str("  Band");
        }
        output.push('\n');
        output.push_str(&format!("{}\n", "-".repeat(if categories.is_some() { 54 } else { 36 })));

        let bands = categories.map(|c| c.bands());
        let scores = result.category_scores.values();
        for (i, (title, (_, weight))) in TITLES.iter().zip(CATEGORY_WEIGHTS.entries()).enumerate() {
            output.push_str(&format!(
                "{:<22} {:>5.0}% {:>6.2}",
                title,
                weight * 100.0,
                scores[i]
            ));
            if let Some(bands) = bands {
                output.push_str(&format!("  {}", bands[i]));
            }
            output.push('\n');
        }

        if let Some(c) = categories {
            output.push_str("\nDetails\n-------\n");
            push_stats(&mut output, TITLES[0], &c.profitability)?;
            push_stats(&mut output, TITLES[1], &c.risk_management)?;
            push_stats(&mut output, TITLES[2], &c.consistency)?;
            push_stats(&mut output, TITLES[3], &c.emotional_discipline)?;
            push_stats(&mut output, TITLES[4], &c.journaling_adherence)?;
        }

        Ok(output)
    }
}

fn push_stats<S: Serialize>(
    output: &mut String,
    title: &str,
    outcome: &CategoryOutcome<S>,
) -> Result<(), VRatingError> {
    let stats = serde_json::to_value(&outcome.stats).map_err(|e| VRatingError::Report {
        reason: format!("cannot serialize {title} statistics: {e}"),
    })?;

    output.push_str(&format!("\n{} ({})\n", title, outcome.band));
    if let Value::Object(map) = stats {
        for (key, value) in map {
            output.push_str(&format!("  {:<28} {}\n", key, format_value(&value)));
        }
    }
    Ok(())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) if n.is_f64() => format!("{:.2}", n.as_f64().unwrap_or_default()),
        other => other.to_string(),
    }
}
