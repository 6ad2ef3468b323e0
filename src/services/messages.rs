//! Localized validation messages

use std::collections::HashMap;

pub const START_DATE_REQUIRED: &str = "report.issuecreation.startdate.required";
pub const END_DATE_REQUIRED: &str = "report.issuecreation.enddate.required";
pub const INTERVAL_INVALID: &str = "report.issuecreation.interval.invalid";
pub const PROJECT_ID_INVALID: &str = "report.issuecreation.projectid.invalid";
pub const END_BEFORE_START: &str = "report.issuecreation.before.startdate";

const DEFAULTS: [(&str, &str); 5] = [
    (START_DATE_REQUIRED, "A valid start date is required."),
    (END_DATE_REQUIRED, "A valid end date is required."),
    (INTERVAL_INVALID, "The interval must be a positive number of days."),
    (PROJECT_ID_INVALID, "Select an existing project."),
    (END_BEFORE_START, "The end date must not be before the start date."),
];

/// Message bundle: built-in English text, optionally overridden per key
#[derive(Debug, Clone)]
pub struct Messages {
    texts: HashMap<String, String>,
}

impl Messages {
    /// Bundle with the built-in defaults and `overrides` applied on top
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut messages = Self::default();
        for (key, text) in overrides {
            messages.texts.insert(key.clone(), text.clone());
        }
        messages
    }

    /// Text for `key`, falling back to the key itself when unknown
    pub fn text(&self, key: &str) -> String {
        self.texts
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            texts: DEFAULTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
