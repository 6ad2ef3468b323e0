//! Issue creation report: validation, aggregation and view assembly

use serde_json::{Map, Value};
use tracing::{error, info};

use super::aggregator::Aggregator;
use super::chart::{bar_heights, DEFAULT_MAX_HEIGHT};
use super::counter::IssueCounter;
use super::date_format::DateFormatter;
use super::messages::{self, Messages};
use super::projects::ProjectLookup;
use super::validator::Validator;
use crate::render::ViewRenderer;
use crate::types::{
    Field, RawParams, ReportError, ReportView, Result, User, ValidatedParams, ValidationError,
    ValidationErrors,
};

/// Name of the view template the report renders
pub const VIEW_NAME: &str = "view";

/// Issue creation report wired to its collaborators
pub struct CreationReport<C, P, F, R> {
    counter: C,
    projects: P,
    formatter: F,
    renderer: R,
    messages: Messages,
    max_height: u32,
}

impl<C, P, F, R> CreationReport<C, P, F, R>
where
    C: IssueCounter,
    P: ProjectLookup,
    F: DateFormatter,
    R: ViewRenderer,
{
    pub fn new(counter: C, projects: P, formatter: F, renderer: R) -> Self {
        Self {
            counter,
            projects,
            formatter,
            renderer,
            messages: Messages::default(),
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_max_height(mut self, max_height: u32) -> Self {
        self.max_height = max_height;
        self
    }

    pub fn validate(
        &self,
        raw: &RawParams,
    ) -> std::result::Result<ValidatedParams, ValidationErrors> {
        Validator::new(&self.formatter, &self.projects, &self.messages).validate(raw)
    }

    /// Count issues per interval and assemble the chart view
    pub fn build_view(&self, params: &ValidatedParams, user: &User) -> Result<ReportView> {
        let project_id = params.project.id;

        let result = Aggregator::compute_buckets(params.range, params.interval_days, |from, to| {
            self.counter.count(project_id, from, to, user)
        })
        .inspect_err(|e| error!(project_id, error = %e, "Issue count query failed"))?;

        // Project name is looked up again at render time
        let project = self.projects.resolve(project_id).ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.push(ValidationError {
                field: Field::SelectedProjectId,
                key: messages::PROJECT_ID_INVALID,
                message: self.messages.text(messages::PROJECT_ID_INVALID),
            });
            ReportError::Validation(errors)
        })?;

        let counts = result.counts();
        let issue_bar_heights = bar_heights(&counts, result.max_count, self.max_height);
        let dates = result
            .buckets
            .iter()
            .map(|b| self.formatter.format(b.range_start))
            .collect();

        info!(
            project = %project.key,
            buckets = counts.len(),
            max_count = result.max_count,
            "Issue creation report computed"
        );

        Ok(ReportView {
            start_date: self.formatter.format(params.range.start),
            end_date: self.formatter.format(params.range.end),
            open_count: counts,
            issue_bar_heights,
            dates,
            max_height: self.max_height,
            project_name: project.name,
            interval: params.interval_days,
        })
    }

    /// Validate, aggregate and render in one call
    pub fn generate(&self, raw: &RawParams, user: &User) -> Result<String> {
        let params = self.validate(raw).map_err(ReportError::Validation)?;
        let view = self.build_view(&params, user)?;
        self.renderer.render(VIEW_NAME, &view_params(&view)?)
    }
}

/// View values as a named mapping for the renderer
pub fn view_params(view: &ReportView) -> Result<Map<String, Value>> {
    match serde_json::to_value(view) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ReportError::Render("view did not serialize to an object".into())),
        Err(e) => Err(ReportError::Render(e.to_string())),
    }
}
