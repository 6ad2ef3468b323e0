//! Issue, project and user types shared by the loaders and collaborators

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project that issue counts are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub key: String,
    pub project_id: i64,
    pub created: DateTime<Utc>,
    /// Users allowed to see this issue. `None` means unrestricted.
    #[serde(default)]
    pub visible_to: Option<Vec<String>>,
}

impl Issue {
    /// Restricted issues are hidden from anonymous users
    pub fn is_visible_to(&self, user: &User) -> bool {
        match (&self.visible_to, &user.name) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(allowed), Some(name)) => allowed.iter().any(|a| a == name),
        }
    }
}

/// The user the report is generated for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub name: Option<String>,
}

impl User {
    pub fn anonymous() -> Self {
        Self { name: None }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
