//! Data types used by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyzers::composite::weighted_term;
use crate::analyzers::utility::{sentinel_mean, sentinel_stddev};
use crate::error::SurveyError;
use crate::field::{AGE_GROUP_LABELS, Field, FieldRange};
use crate::survey::Respondent;

/// Respondents sharing one age-group id.
#[derive(Debug, Clone)]
pub struct AgeGroup {
    id: u8,
    respondents: Vec<Respondent>,
}

impl AgeGroup {
    fn new(id: u8) -> Self {
        Self {
            id,
            respondents: Vec::new(),
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn label(&self) -> &'static str {
        AGE_GROUP_LABELS[usize::from(self.id) - 1]
    }

    pub fn len(&self) -> usize {
        self.respondents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.respondents.is_empty()
    }

    fn values(&self, field: Field) -> impl Iterator<Item = f64> + '_ {
        self.respondents.iter().map(move |r| r.value(field))
    }

    /// Mean of `field` over the group, skipping "not stated" answers.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Division`] if no respondent stated an answer.
    pub fn average(&self, field: Field) -> Result<f64, SurveyError> {
        sentinel_mean(self.values(field), field.range().sentinel).ok_or(SurveyError::Division {
            age_group: self.id,
            field,
        })
    }

    /// Full per-field statistics for the group.
    pub fn field_aggregate(&self, field: Field) -> Result<FieldAggregate, SurveyError> {
        let sentinel = field.range().sentinel;
        let average = self.average(field)?;
        let not_stated = self.values(field).filter(|v| *v == sentinel).count();

        Ok(FieldAggregate {
            average,
            stddev: sentinel_stddev(self.values(field), sentinel, average),
            responses: self.len() - not_stated,
            not_stated,
            contribution: weighted_term(field, average),
        })
    }
}

/// The six age groups, ordered by id.
#[derive(Debug, Clone)]
pub struct AgeGroups {
    groups: [AgeGroup; 6],
}

impl AgeGroups {
    /// Buckets respondents by their age-group id.
    pub fn from_respondents(respondents: impl IntoIterator<Item = Respondent>) -> Self {
        let mut groups: [AgeGroup; 6] = std::array::from_fn(|i| AgeGroup::new(i as u8 + 1));
        for r in respondents {
            groups[usize::from(r.age_group()) - 1].respondents.push(r);
        }
        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgeGroup> {
        self.groups.iter()
    }

    /// Returns the group with the given id, or `None` outside 1..=6.
    pub fn get(&self, id: u8) -> Option<&AgeGroup> {
        self.groups.get(usize::from(id).checked_sub(1)?)
    }
}

/// Statistics for one field within one age group.
#[derive(Debug, Clone, Serialize)]
pub struct FieldAggregate {
    pub average: f64,
    pub stddev: f64,
    pub responses: usize,
    pub not_stated: usize,
    /// Share of the group's composite score coming from this field.
    pub contribution: f64,
}

/// Per-group breakdown and composite score.
#[derive(Debug, Clone, Serialize)]
pub struct GroupAggregate {
    pub age_group: u8,
    pub label: String,
    pub respondents: usize,
    pub fields: BTreeMap<Field, FieldAggregate>,
    pub composite: f64,
}

/// One field's averages across the six age groups, with its answer range.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSeries {
    pub field: Field,
    pub label: String,
    #[serde(flatten)]
    pub range: FieldRange,
    pub averages: Vec<f64>,
}

/// Complete aggregation result consumed by the chart and summary writers.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyAggregate {
    pub schema_version: u8,
    pub algorithm_version: u8,
    pub generated_at: DateTime<Utc>,
    pub age_groups: Vec<String>,
    pub composite_scores: Vec<f64>,
    pub series: Vec<FieldSeries>,
    pub groups: Vec<GroupAggregate>,
}
