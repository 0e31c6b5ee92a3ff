//! CSV ingestion for the anxiety survey dataset.
//!
//! Columns are selected by position, never by header name. The header row is
//! skipped without being inspected.

use std::fs;
use std::path::Path;

use csv::{Position, ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SurveyError;
use crate::field::{AGE_GROUP_COLUMN, Field, MIN_COLUMNS};

/// How to treat an age-group id outside 1..=6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BucketPolicy {
    /// Reject the row with [`SurveyError::AgeGroupOutOfRange`].
    #[default]
    Strict,
    /// Route the row into the last age group (6), logging a warning.
    FoldIntoLast,
}

/// One survey respondent.
///
/// `age_group` is always within 1..=6. Each value is either within its
/// field's answer range or equal to its "not stated" code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Respondent {
    age_group: u8,
    values: [f64; 6],
}

impl Respondent {
    /// Builds a respondent from raw answers in [`Field::ALL`] order.
    ///
    /// The last entry is the raw financial answer; it is stored as `|raw - 6|`.
    /// Returns `None` if `age_group` is outside 1..=6.
    pub fn new(age_group: u8, raw: [f64; 6]) -> Option<Self> {
        if !(1..=6).contains(&age_group) {
            return None;
        }
        let mut values = raw;
        let fin = Field::FinancialImpact.index();
        values[fin] = financial_impact(raw[fin]);
        Some(Self { age_group, values })
    }

    pub fn age_group(&self) -> u8 {
        self.age_group
    }

    pub fn value(&self, field: Field) -> f64 {
        self.values[field.index()]
    }
}

/// Remaps the reversed 1..9 financial answer onto an impact magnitude.
pub fn financial_impact(raw: f64) -> f64 {
    (raw - 6.0).abs()
}

/// Reads every data row of the survey CSV at `path`.
///
/// An empty line between data rows is reported as a row with no columns.
/// Empty lines after the last row are ignored.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_respondents(
    path: &Path,
    policy: BucketPolicy,
) -> Result<Vec<Respondent>, SurveyError> {
    let bytes = fs::read(path).map_err(|source| SurveyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes.as_slice());

    let mut respondents = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let (offset, line) = record
            .position()
            .map_or((usize::MAX, 0), |pos| row_start(&bytes, pos));
        // the reader drops empty lines without yielding a record for them
        if matches!(bytes.get(offset), Some(b'\r' | b'\n')) {
            return Err(SurveyError::Schema {
                line,
                found: 0,
                expected: MIN_COLUMNS,
            });
        }
        respondents.push(parse_row(line, &record, policy)?);
    }

    info!(rows = respondents.len(), "Survey loaded");
    Ok(respondents)
}

/// Byte offset and line where a record reported at `pos` begins.
///
/// With CRLF endings the reader stops after the `\r` of the previous row, so
/// its `\n` still sits at `pos`.
fn row_start(bytes: &[u8], pos: &Position) -> (usize, u64) {
    let offset = usize::try_from(pos.byte()).unwrap_or(usize::MAX);
    let pending_lf = offset > 0
        && bytes.get(offset - 1) == Some(&b'\r')
        && bytes.get(offset) == Some(&b'\n');
    if pending_lf {
        (offset + 1, pos.line() + 1)
    } else {
        (offset, pos.line())
    }
}

/// Maps one CSV row onto a [`Respondent`].
pub fn parse_row(
    line: u64,
    record: &StringRecord,
    policy: BucketPolicy,
) -> Result<Respondent, SurveyError> {
    if record.len() < MIN_COLUMNS {
        return Err(SurveyError::Schema {
            line,
            found: record.len(),
            expected: MIN_COLUMNS,
        });
    }

    let raw_group = cell(record, AGE_GROUP_COLUMN);
    let group: i64 = raw_group.parse().map_err(|_| SurveyError::Parse {
        line,
        column: AGE_GROUP_COLUMN,
        field: "age_group",
        value: raw_group.to_string(),
    })?;

    let age_group = match u8::try_from(group) {
        Ok(g @ 1..=6) => g,
        _ => match policy {
            BucketPolicy::Strict => {
                return Err(SurveyError::AgeGroupOutOfRange { line, value: group });
            }
            BucketPolicy::FoldIntoLast => {
                warn!(
                    line,
                    age_group = group,
                    "Age group out of range, folding into group 6"
                );
                6
            }
        },
    };

    let mut raw = [0.0; 6];
    for field in Field::ALL {
        let text = cell(record, field.column());
        raw[field.index()] = text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SurveyError::Parse {
                line,
                column: field.column(),
                field: field.key(),
                value: text.to_string(),
            })?;
    }

    let respondent = Respondent::new(age_group, raw).ok_or(SurveyError::AgeGroupOutOfRange {
        line,
        value: group,
    })?;
    debug!(line, age_group, "Row parsed");
    Ok(respondent)
}

fn cell(record: &StringRecord, column: usize) -> &str {
    record.get(column).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Builds a 43-column record with the given age group and raw answers.
    fn row(age_group: &str, raw: [&str; 6]) -> StringRecord {
        let mut cells = vec!["0".to_string(); MIN_COLUMNS];
        cells[AGE_GROUP_COLUMN] = age_group.to_string();
        for field in Field::ALL {
            cells[field.column()] = raw[field.index()].to_string();
        }
        StringRecord::from(cells)
    }

    /// One comma-joined data line for the given age group.
    fn data_line(age_group: &str) -> String {
        row(age_group, ["10", "3", "5", "2", "4", "6"])
            .iter()
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_financial_transform_bounds() {
        for raw in 1..=9 {
            let v = financial_impact(raw as f64);
            assert_eq!(v, (raw as f64 - 6.0).abs());
            assert!((0.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn test_new_rejects_unknown_group() {
        assert!(Respondent::new(0, [0.0; 6]).is_none());
        assert!(Respondent::new(7, [0.0; 6]).is_none());
        assert!(Respondent::new(6, [0.0; 6]).is_some());
    }

    #[test]
    fn test_parse_row_maps_columns() {
        let rec = row("2", ["10", "3", "5", "2", "4", "9"]);
        let r = parse_row(2, &rec, BucketPolicy::Strict).unwrap();

        assert_eq!(r.age_group(), 2);
        assert_eq!(r.value(Field::AnxietyScore), 10.0);
        assert_eq!(r.value(Field::BeforeDistancing), 3.0);
        assert_eq!(r.value(Field::ConcernCanada), 5.0);
        assert_eq!(r.value(Field::ConcernSocial), 2.0);
        assert_eq!(r.value(Field::PerceivedHealth), 4.0);
        assert_eq!(r.value(Field::FinancialImpact), 3.0);
    }

    #[test]
    fn test_parse_row_short_row_is_schema_error() {
        let rec = StringRecord::from(vec!["1"; 42]);
        let err = parse_row(5, &rec, BucketPolicy::Strict).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Schema);
        assert!(matches!(
            err,
            SurveyError::Schema {
                line: 5,
                found: 42,
                expected: 43
            }
        ));
    }

    #[test]
    fn test_parse_row_non_numeric_is_parse_error() {
        let rec = row("1", ["10", "three", "5", "2", "4", "6"]);
        let err = parse_row(3, &rec, BucketPolicy::Strict).unwrap_err();

        match err {
            SurveyError::Parse {
                line,
                column,
                field,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, 3);
                assert_eq!(field, "before_distancing");
                assert_eq!(value, "three");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_row_rejects_non_finite() {
        for text in ["NaN", "inf", "-infinity"] {
            let rec = row("1", ["10", "3", "5", "2", text, "6"]);
            let err = parse_row(7, &rec, BucketPolicy::Strict).unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Parse);
            match err {
                SurveyError::Parse {
                    line,
                    column,
                    field,
                    value,
                } => {
                    assert_eq!(line, 7);
                    assert_eq!(column, 2);
                    assert_eq!(field, "perceived_health");
                    assert_eq!(value, text);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_parse_row_non_numeric_age_group() {
        let rec = row("65+", ["10", "3", "5", "2", "4", "6"]);
        let err = parse_row(4, &rec, BucketPolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_strict_policy_rejects_unknown_group() {
        for group in ["0", "7", "-1", "300"] {
            let rec = row(group, ["10", "3", "5", "2", "4", "6"]);
            let err = parse_row(9, &rec, BucketPolicy::Strict).unwrap_err();
            assert!(matches!(err, SurveyError::AgeGroupOutOfRange { line: 9, .. }));
        }
    }

    #[test]
    fn test_fold_policy_routes_unknown_group_to_last() {
        for group in ["0", "7", "-1"] {
            let rec = row(group, ["10", "3", "5", "2", "4", "6"]);
            let r = parse_row(9, &rec, BucketPolicy::FoldIntoLast).unwrap();
            assert_eq!(r.age_group(), 6);
        }
    }

    #[test]
    fn test_load_respondents_skips_header() {
        let path = std::env::temp_dir().join("anxiety_survey_test_load.csv");
        let header = (0..MIN_COLUMNS)
            .map(|i| format!("col{i}"))
            .collect::<Vec<_>>()
            .join(",");
        let data = row("1", ["10", "3", "5", "2", "4", "6"])
            .iter()
            .collect::<Vec<_>>()
            .join(",");
        std::fs::write(&path, format!("{header}\n{data}\n{data}\n")).unwrap();

        let rows = load_respondents(&path, BucketPolicy::Strict).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value(Field::FinancialImpact), 0.0);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_respondents_skips_data_like_header() {
        let path = std::env::temp_dir().join("anxiety_survey_test_numeric_header.csv");
        // a header that would be rejected as data (age group 9)
        let header = data_line("9");
        let data = data_line("3");
        std::fs::write(&path, format!("{header}\n{data}\n")).unwrap();

        let rows = load_respondents(&path, BucketPolicy::Strict).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].age_group(), 3);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_respondents_blank_line_is_schema_error() {
        let path = std::env::temp_dir().join("anxiety_survey_test_blank_line.csv");
        let data = data_line("1");
        std::fs::write(&path, format!("header\n{data}\n\n{data}\n")).unwrap();

        let err = load_respondents(&path, BucketPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            SurveyError::Schema {
                line: 3,
                found: 0,
                expected: 43
            }
        ));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_respondents_crlf_lines() {
        let path = std::env::temp_dir().join("anxiety_survey_test_crlf.csv");
        let data = data_line("2");
        let short = "1,2,3";

        std::fs::write(&path, format!("header\r\n{data}\r\n{data}\r\n")).unwrap();
        let rows = load_respondents(&path, BucketPolicy::Strict).unwrap();
        assert_eq!(rows.len(), 2);

        std::fs::write(&path, format!("header\r\n{data}\r\n\r\n{data}\r\n")).unwrap();
        let err = load_respondents(&path, BucketPolicy::Strict).unwrap_err();
        assert!(matches!(err, SurveyError::Schema { line: 3, found: 0, .. }));

        std::fs::write(&path, format!("header\r\n{data}\r\n{short}\r\n")).unwrap();
        let err = load_respondents(&path, BucketPolicy::Strict).unwrap_err();
        assert!(matches!(err, SurveyError::Schema { line: 3, found: 3, .. }));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_respondents_ignores_trailing_blank_lines() {
        let path = std::env::temp_dir().join("anxiety_survey_test_trailing_blank.csv");
        let data = data_line("4");
        std::fs::write(&path, format!("header\n{data}\n\n\n")).unwrap();

        let rows = load_respondents(&path, BucketPolicy::Strict).unwrap();
        assert_eq!(rows.len(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_respondents_missing_file() {
        let path = std::env::temp_dir().join("anxiety_survey_does_not_exist.csv");
        let _ = std::fs::remove_file(&path);

        let err = load_respondents(&path, BucketPolicy::Strict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
