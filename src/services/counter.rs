//! Issue counting service

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::{Issue, Result, User};

/// Counts issues created in a project within `[created_from, created_to)`,
/// as seen by the acting user
pub trait IssueCounter {
    fn count(
        &self,
        project_id: i64,
        created_from: DateTime<Utc>,
        created_to: DateTime<Utc>,
        user: &User,
    ) -> Result<u64>;
}

/// In-memory issue index, grouped by project and sorted by creation time
#[derive(Debug, Clone, Default)]
pub struct IssueIndex {
    by_project: HashMap<i64, Vec<Issue>>,
}

impl IssueIndex {
    pub fn new(issues: Vec<Issue>) -> Self {
        let mut by_project: HashMap<i64, Vec<Issue>> = HashMap::new();
        for issue in issues {
            by_project.entry(issue.project_id).or_default().push(issue);
        }
        for list in by_project.values_mut() {
            list.sort_by_key(|i| i.created);
        }
        Self { by_project }
    }

    pub fn len(&self) -> usize {
        self.by_project.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IssueCounter for IssueIndex {
    fn count(
        &self,
        project_id: i64,
        created_from: DateTime<Utc>,
        created_to: DateTime<Utc>,
        user: &User,
    ) -> Result<u64> {
        let Some(issues) = self.by_project.get(&project_id) else {
            return Ok(0);
        };

        let lo = issues.partition_point(|i| i.created < created_from);
        let hi = issues.partition_point(|i| i.created < created_to);
        if lo >= hi {
            return Ok(0);
        }

        let visible = issues[lo..hi]
            .iter()
            .filter(|i| i.is_visible_to(user))
            .count();
        Ok(visible as u64)
    }
}
