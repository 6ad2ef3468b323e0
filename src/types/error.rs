use std::fmt;

use thiserror::Error;

/// Parameter that failed validation, named the way the report form names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StartDate,
    EndDate,
    Interval,
    SelectedProjectId,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Interval => "interval",
            Self::SelectedProjectId => "selectedProjectId",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field-scoped, user-correctable problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    /// Message bundle key (e.g. `report.issuecreation.interval.invalid`)
    pub key: &'static str,
    /// Localized text resolved from the bundle
    pub message: String,
}

/// All validation problems found in one pass, in the order they were checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Errors reported against a given field
    pub fn for_field(&self, field: Field) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.field == field).collect()
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// creation-report error types
#[derive(Error, Debug)]
pub enum ReportError {
    /// One or more report parameters were rejected
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// The counting service failed
    #[error("query error: {0}")]
    Query(String),

    /// Bucket width must be at least one day
    #[error("invalid interval: {0} day(s)")]
    InvalidInterval(u64),

    /// Failed to parse JSON/JSONL input
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// View rendering failed
    #[error("render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for creation-report
pub type Result<T> = std::result::Result<T, ReportError>;
