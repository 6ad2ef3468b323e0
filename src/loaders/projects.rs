use std::fs;
use std::path::Path;

use crate::types::{Project, ReportError, Result};

/// Read a JSON array of projects
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ReportError::Parse(format!("{}: {}", path.display(), e)))
}
