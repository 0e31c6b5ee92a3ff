//! The six survey questions that feed the age-group analysis.
//!
//! Every per-field constant (CSV column, answer range, "not stated" code,
//! normalization range, composite weight, chart label and color) lives here
//! and is resolved by matching on [`Field`].

use serde::Serialize;
use std::fmt;

/// Number of columns every data row must carry.
pub const MIN_COLUMNS: usize = 43;

/// CSV column holding the age-group id.
pub const AGE_GROUP_COLUMN: usize = 31;

/// Display labels for age groups 1 through 6.
pub const AGE_GROUP_LABELS: [&str; 6] = ["15-24", "25-34", "35-44", "45-54", "55-64", "65+"];

/// A numeric survey question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Generalized anxiety severity score.
    AnxietyScore,
    /// Mental health compared to before physical distancing.
    BeforeDistancing,
    /// Concern about COVID-19's impact on the Canadian population's health.
    ConcernCanada,
    /// Concern about COVID-19's impact on maintaining social ties.
    ConcernSocial,
    /// Perceived mental health.
    PerceivedHealth,
    /// Impact on the ability to meet financial obligations or essential needs.
    FinancialImpact,
}

/// Answer bounds and the code used for "not stated".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub sentinel: f64,
}

impl Field {
    /// All fields in composite-score order.
    pub const ALL: [Field; 6] = [
        Field::AnxietyScore,
        Field::BeforeDistancing,
        Field::ConcernCanada,
        Field::ConcernSocial,
        Field::PerceivedHealth,
        Field::FinancialImpact,
    ];

    /// Zero-based CSV column the raw answer is read from.
    pub fn column(self) -> usize {
        match self {
            Field::AnxietyScore => 28,
            Field::BeforeDistancing => 3,
            Field::ConcernCanada => 18,
            Field::ConcernSocial => 22,
            Field::PerceivedHealth => 2,
            Field::FinancialImpact => 37,
        }
    }

    pub fn range(self) -> FieldRange {
        let (min, max, sentinel) = match self {
            Field::AnxietyScore => (0.0, 21.0, 99.0),
            Field::BeforeDistancing => (1.0, 5.0, 9.0),
            Field::ConcernCanada => (1.0, 5.0, 9.0),
            Field::ConcernSocial => (1.0, 4.0, 9.0),
            Field::PerceivedHealth => (1.0, 5.0, 9.0),
            Field::FinancialImpact => (1.0, 5.0, 9.0),
        };
        FieldRange { min, max, sentinel }
    }

    /// Divisor that scales the field average into roughly 0..1 for the composite.
    pub fn normalization(self) -> f64 {
        match self {
            Field::AnxietyScore => 22.0,
            Field::ConcernSocial => 4.0,
            _ => 5.0,
        }
    }

    /// Share of the composite score contributed by this field.
    pub fn weight(self) -> f64 {
        match self {
            Field::AnxietyScore => 0.30,
            Field::BeforeDistancing | Field::FinancialImpact => 0.20,
            Field::ConcernCanada | Field::ConcernSocial | Field::PerceivedHealth => 0.10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::AnxietyScore => "Anxiety Score",
            Field::BeforeDistancing => "Before Distancing",
            Field::ConcernCanada => "Concern for Canadians",
            Field::ConcernSocial => "Concern for Social Impact",
            Field::PerceivedHealth => "Perceived Mental Health",
            Field::FinancialImpact => "Financial Impact",
        }
    }

    /// Line color as an RGB triple.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Field::AnxietyScore => (0xCF, 0x33, 0x33),
            Field::BeforeDistancing => (0xCF, 0xCA, 0x33),
            Field::ConcernCanada => (0x8B, 0xCF, 0x33),
            Field::ConcernSocial => (0x33, 0xCF, 0xCF),
            Field::PerceivedHealth => (0x33, 0x4A, 0xCF),
            Field::FinancialImpact => (0xCF, 0x33, 0xC2),
        }
    }

    pub fn color_hex(self) -> String {
        let (r, g, b) = self.color();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Stable identifier used in logs, errors and JSON keys.
    pub fn key(self) -> &'static str {
        match self {
            Field::AnxietyScore => "anxiety_score",
            Field::BeforeDistancing => "before_distancing",
            Field::ConcernCanada => "concern_canada",
            Field::ConcernSocial => "concern_social",
            Field::PerceivedHealth => "perceived_health",
            Field::FinancialImpact => "financial_impact",
        }
    }

    /// Position of the field within [`Field::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returns the display label for an age-group id, or `None` outside 1..=6.
pub fn age_group_label(age_group: u8) -> Option<&'static str> {
    AGE_GROUP_LABELS.get(usize::from(age_group).checked_sub(1)?).copied()
}
