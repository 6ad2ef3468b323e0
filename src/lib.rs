//! Issue creation report: bucket per-project issue counts into fixed-width
//! intervals and render them as a bar chart.

pub mod cli;
pub mod config;
pub mod loaders;
pub mod render;
pub mod services;
pub mod types;
