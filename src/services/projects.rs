//! Project lookup

use std::collections::HashMap;

use crate::types::Project;

/// Resolves a project id to a project
pub trait ProjectLookup {
    fn resolve(&self, id: i64) -> Option<Project>;
}

/// In-memory project catalog keyed by id
#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: HashMap<i64, Project>,
}

impl ProjectCatalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects: projects.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// All projects sorted by id
    pub fn projects(&self) -> Vec<&Project> {
        let mut list: Vec<&Project> = self.projects.values().collect();
        list.sort_by_key(|p| p.id);
        list
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl ProjectLookup for ProjectCatalog {
    fn resolve(&self, id: i64) -> Option<Project> {
        self.projects.get(&id).cloned()
    }
}
