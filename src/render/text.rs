//! Plain-text bar chart renderer

use serde_json::{Map, Value};

use super::ViewRenderer;
use crate::services::chart::format_bar;
use crate::types::{ReportError, Result};

pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Renders the report view as a horizontal bar chart, one row per bucket
#[derive(Debug, Clone)]
pub struct TextRenderer {
    bar_width: usize,
}

impl TextRenderer {
    pub fn new(bar_width: usize) -> Self {
        Self { bar_width }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH)
    }
}

impl ViewRenderer for TextRenderer {
    fn render(&self, view: &str, params: &Map<String, Value>) -> Result<String> {
        let project = str_param(params, "projectName")?;
        let start = str_param(params, "startDate")?;
        let end = str_param(params, "endDate")?;
        let interval = u64_param(params, "interval")?;
        let max_height = u64_param(params, "maxHeight")?;
        let max_height = u32::try_from(max_height)
            .map_err(|_| ReportError::Render(format!("maxHeight out of range: {}", max_height)))?;

        let dates = array_param(params, "dates")?;
        let counts = array_param(params, "openCount")?;
        let heights = array_param(params, "issueBarHeights")?;
        if dates.len() != counts.len() || heights.len() != counts.len() {
            return Err(ReportError::Render(format!(
                "{}: dates, openCount and issueBarHeights differ in length",
                view
            )));
        }

        let mut out = String::new();
        out.push_str(&format!("Issue creation report: {}\n", project));
        out.push_str(&format!(
            "{} - {}, interval {} day(s)\n",
            start, end, interval
        ));

        if counts.is_empty() {
            out.push_str("\n(no intervals in range)\n");
            return Ok(out);
        }

        let labels: Vec<&str> = dates.iter().map(|d| d.as_str().unwrap_or("?")).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        out.push('\n');
        for ((label, count), height) in labels.iter().zip(counts).zip(heights) {
            let count = count.as_u64().unwrap_or(0);
            let height = height.as_f64().unwrap_or(0.0);
            out.push_str(&format!(
                "{:<width$}  {}  {}\n",
                label,
                format_bar(height, max_height, self.bar_width),
                count,
                width = label_width
            ));
        }

        let total: u64 = counts.iter().filter_map(Value::as_u64).sum();
        out.push_str(&format!("\nTotal: {}\n", total));
        Ok(out)
    }
}

fn missing(name: &str) -> ReportError {
    ReportError::Render(format!("missing or invalid view value '{}'", name))
}

fn str_param<'a>(params: &'a Map<String, Value>, name: &str) -> Result<&'a str> {
    params.get(name).and_then(Value::as_str).ok_or_else(|| missing(name))
}

fn u64_param(params: &Map<String, Value>, name: &str) -> Result<u64> {
    params.get(name).and_then(Value::as_u64).ok_or_else(|| missing(name))
}

fn array_param<'a>(params: &'a Map<String, Value>, name: &str) -> Result<&'a Vec<Value>> {
    params.get(name).and_then(Value::as_array).ok_or_else(|| missing(name))
}
