//! Date formatting and parsing for report parameters and labels

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats and parses the dates shown on the report form and chart
pub trait DateFormatter {
    fn format(&self, date: DateTime<Utc>) -> String;

    /// Parse user input. `None` when the input doesn't match the format.
    fn parse(&self, input: &str) -> Option<DateTime<Utc>>;
}

/// chrono pattern-based formatter (e.g. `%Y-%m-%d`, `%d/%b/%y`)
#[derive(Debug, Clone)]
pub struct PatternDateFormatter {
    pattern: String,
}

impl PatternDateFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Default for PatternDateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl DateFormatter for PatternDateFormatter {
    fn format(&self, date: DateTime<Utc>) -> String {
        date.format(&self.pattern).to_string()
    }

    fn parse(&self, input: &str) -> Option<DateTime<Utc>> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        // Patterns with a time component parse as a full timestamp,
        // date-only patterns land on midnight UTC
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, &self.pattern) {
            return Some(dt.and_utc());
        }
        NaiveDate::parse_from_str(input, &self.pattern)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}
