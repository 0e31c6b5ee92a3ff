use crate::analyzers::aggregate::aggregate;
use crate::analyzers::types::{AgeGroups, SurveyAggregate};
use crate::error::SurveyError;
use crate::survey::{BucketPolicy, load_respondents};
use std::path::Path;
use tracing::info;

/// Loads the survey at `path`, buckets it by age group and scores each group.
///
/// Every call builds its own groups and aggregates; nothing is shared
/// between runs.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn analyze(path: &Path, policy: BucketPolicy) -> Result<SurveyAggregate, SurveyError> {
    let respondents = load_respondents(path, policy)?;
    let groups = AgeGroups::from_respondents(respondents);

    for group in groups.iter() {
        info!(age_group = group.label(), respondents = group.len(), "Age group bucketed");
    }

    let result = aggregate(&groups)?;
    info!(groups = result.groups.len(), "Aggregation complete");
    Ok(result)
}
