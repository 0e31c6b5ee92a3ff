//! Age-group aggregation and composite scoring.
//!
//! This module buckets respondents by age group, computes sentinel-aware
//! averages for each survey field, and folds them into one weighted
//! composite score per group.

pub mod aggregate;
pub mod analyzer;
pub mod composite;
pub mod types;
pub mod utility;
