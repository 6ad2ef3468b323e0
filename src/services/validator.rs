//! Report parameter validation
//!
//! Every check runs regardless of earlier failures so the form can show
//! all problems at once.

use chrono::TimeDelta;
use tracing::error;

use super::date_format::DateFormatter;
use super::messages::{self, Messages};
use super::projects::ProjectLookup;
use crate::types::{
    Field, RawParams, TimeRange, ValidatedParams, ValidationError, ValidationErrors,
};

/// Validates raw report parameters against a formatter and project lookup
pub struct Validator<'a, F, P> {
    formatter: &'a F,
    projects: &'a P,
    messages: &'a Messages,
}

impl<'a, F: DateFormatter, P: ProjectLookup> Validator<'a, F, P> {
    pub fn new(formatter: &'a F, projects: &'a P, messages: &'a Messages) -> Self {
        Self {
            formatter,
            projects,
            messages,
        }
    }

    pub fn validate(&self, raw: &RawParams) -> Result<ValidatedParams, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let start = raw.start_date.as_deref().and_then(|s| self.formatter.parse(s));
        if start.is_none() {
            error!(value = ?raw.start_date, "Exception while parsing startDate");
            self.reject(&mut errors, Field::StartDate, messages::START_DATE_REQUIRED);
        }

        let end = raw.end_date.as_deref().and_then(|s| self.formatter.parse(s));
        if end.is_none() {
            error!(value = ?raw.end_date, "Exception while parsing endDate");
            self.reject(&mut errors, Field::EndDate, messages::END_DATE_REQUIRED);
        }

        let interval = raw.interval.and_then(interval_days);
        if interval.is_none() {
            error!(value = ?raw.interval, "Invalid interval");
            self.reject(&mut errors, Field::Interval, messages::INTERVAL_INVALID);
        }

        let project = raw
            .selected_project_id
            .and_then(|id| self.projects.resolve(id));
        if project.is_none() {
            error!(value = ?raw.selected_project_id, "Invalid projectId");
            self.reject(
                &mut errors,
                Field::SelectedProjectId,
                messages::PROJECT_ID_INVALID,
            );
        }

        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                error!(start = %s, end = %e, "Invalid dates: start date should be before end date");
                self.reject(&mut errors, Field::EndDate, messages::END_BEFORE_START);
            }
        }

        match (start, end, interval, project) {
            (Some(start), Some(end), Some(interval_days), Some(project)) if errors.is_empty() => {
                Ok(ValidatedParams {
                    range: TimeRange::new(start, end),
                    interval_days,
                    project,
                })
            }
            _ => Err(errors),
        }
    }

    fn reject(&self, errors: &mut ValidationErrors, field: Field, key: &'static str) {
        errors.push(ValidationError {
            field,
            key,
            message: self.messages.text(key),
        });
    }
}

/// Positive day counts that still fit in a time span
fn interval_days(value: i64) -> Option<u64> {
    if value <= 0 {
        return None;
    }
    TimeDelta::try_days(value).map(|_| value as u64)
}
