//! Issue JSONL loader

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::types::{Issue, Result};

pub const DEFAULT_FILE_PATTERN: &str = "**/*.jsonl";

/// Loads issues from every JSONL file under a data directory
pub struct IssueLoader {
    data_dir: PathBuf,
    file_pattern: String,
}

impl IssueLoader {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.file_pattern = pattern.into();
        self
    }

    /// Parse all files in parallel. Duplicate keys keep the first issue seen
    /// in file path order.
    pub fn load_all(&self) -> Vec<Issue> {
        let files = self.collect_files();
        debug!(dir = %self.data_dir.display(), files = files.len(), "Loading issue files");

        let per_file: Vec<Vec<Issue>> = files
            .par_iter()
            .map(|f| match Self::parse_file(f) {
                Ok(issues) => issues,
                Err(e) => {
                    warn!(file = %f.display(), error = %e, "Failed to read issue file");
                    Vec::new()
                }
            })
            .collect();

        let mut seen: HashSet<String> = HashSet::new();
        let mut issues = Vec::new();
        for issue in per_file.into_iter().flatten() {
            if seen.insert(issue.key.clone()) {
                issues.push(issue);
            } else {
                debug!(key = %issue.key, "Skipping duplicate issue");
            }
        }
        issues
    }

    /// Parse a single JSONL file. Blank and malformed lines are skipped.
    pub fn parse_file(path: &Path) -> Result<Vec<Issue>> {
        let reader = BufReader::new(File::open(path)?);
        let mut issues = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Issue>(&line) {
                Ok(issue) => issues.push(issue),
                Err(e) => warn!(
                    file = %path.display(),
                    line = idx + 1,
                    error = %e,
                    "Skipping malformed issue line"
                ),
            }
        }

        Ok(issues)
    }

    /// All files matching the pattern, sorted so dedup is deterministic
    fn collect_files(&self) -> Vec<PathBuf> {
        let pattern = self.data_dir.join(&self.file_pattern);
        let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
            .map(|paths| paths.filter_map(|e| e.ok()).filter(|p| p.is_file()).collect())
            .unwrap_or_default();
        files.sort();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("issues")
    }

    #[test]
    fn test_load_fixtures() {
        let issues = IssueLoader::new(fixtures()).load_all();
        // demo.jsonl (7 valid) + ops.jsonl (3) + archive/old.jsonl (2, one duplicates DEMO-1)
        assert_eq!(issues.len(), 11);
        assert_eq!(issues.iter().filter(|i| i.key == "DEMO-1").count(), 1);
    }

    #[test]
    fn test_first_file_wins_on_duplicate() {
        let issues = IssueLoader::new(fixtures()).load_all();
        let demo1 = issues.iter().find(|i| i.key == "DEMO-1").unwrap();
        // archive/old.jsonl sorts before demo.jsonl
        assert_eq!(demo1.created.to_rfc3339(), "2023-12-30T08:00:00+00:00");
    }

    #[test]
    fn test_parse_file_skips_malformed_lines() {
        let issues = IssueLoader::parse_file(&fixtures().join("demo.jsonl")).unwrap();
        assert_eq!(issues.len(), 7);
        assert!(issues.iter().any(|i| i.visible_to.is_some()));
    }

    #[test]
    fn test_parse_missing_file_errors() {
        assert!(IssueLoader::parse_file(&fixtures().join("nope.jsonl")).is_err());
    }

    #[test]
    fn test_load_nonexistent_directory() {
        let issues = IssueLoader::new(PathBuf::from("tests/fixtures/nonexistent")).load_all();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_custom_pattern() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("a.json"),
            r#"{"key":"X-1","project_id":1,"created":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("b.jsonl"),
            r#"{"key":"X-2","project_id":1,"created":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        let loader = IssueLoader::new(tmp.path().to_path_buf()).with_pattern("*.json");
        let issues = loader.load_all();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "X-1");
    }
}
