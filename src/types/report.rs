//! Report types: time ranges, buckets, parameters and the rendered view model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Project;

/// Overall reporting window. Buckets cover `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// One sub-range of the report window and the number of issues created in it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub range_start: DateTime<Utc>,
    pub range_end: DateTime<Utc>,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub buckets: Vec<Bucket>,
    /// Largest bucket count, 0 when there are no buckets
    pub max_count: u64,
}

impl AggregationResult {
    pub fn counts(&self) -> Vec<u64> {
        self.buckets.iter().map(|b| b.count).collect()
    }
}

/// Report parameters as submitted, before any parsing or lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub interval: Option<i64>,
    pub selected_project_id: Option<i64>,
}

impl RawParams {
    /// Build from a form-style map keyed by `startDate`, `endDate`,
    /// `interval` and `selectedProjectId`. Numbers that fail to parse are
    /// treated as missing.
    pub fn from_map(params: &HashMap<String, String>) -> Self {
        let long_param = |name: &str| {
            params
                .get(name)
                .and_then(|v| v.trim().parse::<i64>().ok())
        };

        Self {
            start_date: params.get("startDate").cloned(),
            end_date: params.get("endDate").cloned(),
            interval: long_param("interval"),
            selected_project_id: long_param("selectedProjectId"),
        }
    }
}

/// Parameters that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedParams {
    pub range: TimeRange,
    pub interval_days: u64,
    pub project: Project,
}

/// Values handed to the view renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub start_date: String,
    pub end_date: String,
    pub open_count: Vec<u64>,
    pub issue_bar_heights: Vec<f64>,
    pub dates: Vec<String>,
    pub max_height: u32,
    pub project_name: String,
    pub interval: u64,
}
