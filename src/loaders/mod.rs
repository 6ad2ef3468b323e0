//! Loaders for the on-disk issue and project data

mod issues;
mod projects;

pub use issues::IssueLoader;
pub use projects::load_projects;
