use crate::analyzers::composite::composite_score;
use crate::analyzers::types::{AgeGroups, FieldSeries, GroupAggregate, SurveyAggregate};
use crate::error::SurveyError;
use crate::field::{AGE_GROUP_LABELS, Field};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

/// Aggregates all six age groups into a single [`SurveyAggregate`].
///
/// Each group's field averages are computed once and scored from that
/// group's own averages only.
///
/// # Errors
///
/// Returns [`SurveyError::Division`] for the first group and field with no
/// stated responses.
#[tracing::instrument(skip_all)]
pub fn aggregate(groups: &AgeGroups) -> Result<SurveyAggregate, SurveyError> {
    let mut group_aggregates = Vec::with_capacity(AGE_GROUP_LABELS.len());
    let mut series: Vec<FieldSeries> = Field::ALL
        .iter()
        .map(|&field| FieldSeries {
            field,
            label: field.label().to_string(),
            range: field.range(),
            averages: Vec::with_capacity(AGE_GROUP_LABELS.len()),
        })
        .collect();

    for group in groups.iter() {
        let mut averages = [0.0; 6];
        let mut fields = BTreeMap::new();

        for field in Field::ALL {
            let stats = group.field_aggregate(field)?;
            averages[field.index()] = stats.average;
            series[field.index()].averages.push(stats.average);
            fields.insert(field, stats);
        }

        let composite = composite_score(&averages);
        debug!(
            age_group = group.id(),
            respondents = group.len(),
            composite,
            "Age group scored"
        );

        group_aggregates.push(GroupAggregate {
            age_group: group.id(),
            label: group.label().to_string(),
            respondents: group.len(),
            fields,
            composite,
        });
    }

    Ok(SurveyAggregate {
        schema_version: 1,
        algorithm_version: 1,
        generated_at: Utc::now(),
        age_groups: AGE_GROUP_LABELS.iter().map(|s| s.to_string()).collect(),
        composite_scores: group_aggregates.iter().map(|g| g.composite).collect(),
        series,
        groups: group_aggregates,
    })
}
