use serde_json::{json, Map, Value};

use super::ViewRenderer;
use crate::types::{ReportError, Result};

/// Emits the view name and its values as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ViewRenderer for JsonRenderer {
    fn render(&self, view: &str, params: &Map<String, Value>) -> Result<String> {
        let doc = json!({ "view": view, "params": params });
        serde_json::to_string_pretty(&doc).map_err(|e| ReportError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_wraps_params() {
        let mut params = Map::new();
        params.insert("projectName".into(), json!("Demo"));
        params.insert("openCount".into(), json!([1, 2]));

        let out = JsonRenderer.render("view", &params).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["view"], "view");
        assert_eq!(value["params"]["projectName"], "Demo");
        assert_eq!(value["params"]["openCount"][1], 2);
    }
}
