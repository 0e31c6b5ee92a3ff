//! Error type shared by ingestion and aggregation.

use std::path::PathBuf;

use thiserror::Error;

use crate::field::Field;

/// Broad classification of a [`SurveyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Schema,
    Division,
}

#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: column {column} ({field}) is not a number: {value:?}")]
    Parse {
        line: u64,
        column: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: expected at least {expected} columns, found {found}")]
    Schema {
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("line {line}: age group {value} is outside 1..=6")]
    AgeGroupOutOfRange { line: u64, value: i64 },

    #[error("age group {age_group}: no stated {field} responses to average")]
    Division { age_group: u8, field: Field },
}

impl SurveyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SurveyError::Io { .. } | SurveyError::Csv(_) => ErrorKind::Io,
            SurveyError::Parse { .. } => ErrorKind::Parse,
            SurveyError::Schema { .. } | SurveyError::AgeGroupOutOfRange { .. } => {
                ErrorKind::Schema
            }
            SurveyError::Division { .. } => ErrorKind::Division,
        }
    }
}
