//! Output formatting and persistence for aggregated survey results.
//!
//! Supports a per-group log table, JSON serialization, the interactive HTML
//! chart and a static SVG rendering.

pub mod chart;
pub mod svg;

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::SurveyAggregate;
use crate::field::Field;
use std::fs;
use std::path::Path;

/// Logs one line per age group with its composite score and field averages.
pub fn log_table(aggregate: &SurveyAggregate) {
    for group in &aggregate.groups {
        let avg = |field: Field| group.fields.get(&field).map(|f| f.average);
        info!(
            age_group = %group.label,
            respondents = group.respondents,
            composite = %format!("{:.4}", group.composite),
            anxiety_score = ?avg(Field::AnxietyScore),
            before_distancing = ?avg(Field::BeforeDistancing),
            concern_canada = ?avg(Field::ConcernCanada),
            concern_social = ?avg(Field::ConcernSocial),
            perceived_health = ?avg(Field::PerceivedHealth),
            financial_impact = ?avg(Field::FinancialImpact),
            "Age group summary"
        );
    }
}

/// Logs the aggregate as pretty-printed JSON.
pub fn print_json(aggregate: &SurveyAggregate) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(aggregate)?);
    Ok(())
}

/// Writes the aggregate as pretty-printed JSON to `path`, replacing any
/// existing file.
pub fn write_json(path: &Path, aggregate: &SurveyAggregate) -> Result<()> {
    let body = serde_json::to_string_pretty(aggregate)?;
    fs::write(path, body)?;
    debug!(path = %path.display(), "JSON summary written");
    Ok(())
}
