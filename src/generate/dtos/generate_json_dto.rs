use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateJsonDto {
    pub json_prompt: Option<Value>,
}

pub fn example_payload() -> Value {
    json!({
        "jsonPrompt": {
            "description": "modern website landing page",
            "color_scheme": "#2ECC71",
            "style": "minimalist"
        }
    })
}
