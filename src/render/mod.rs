//! View renderers: turn a named view and its values into output text

mod json;
mod text;

pub use json::JsonRenderer;
pub use text::{TextRenderer, DEFAULT_BAR_WIDTH};

use serde_json::{Map, Value};

use crate::types::Result;

/// Rendering sink for report views
pub trait ViewRenderer {
    fn render(&self, view: &str, params: &Map<String, Value>) -> Result<String>;
}
