use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

use super::{errors::DefaultApiError, models::api_error::ApiError};

pub async fn get_root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "active",
        "service": "FLUX.2 AI Image Generation API",
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.envy.model_name(),
        "endpoints": {
            "text_to_image": "POST /api/generate",
            "multi_reference": "POST /api/generate/multi",
            "json_prompt": "POST /api/generate/json"
        },
        "features": [
            "Text-to-Image Generation",
            "Multi-Reference Images (up to 4)",
            "JSON Precise Control",
            "Multi-language Support",
            "Hex Color Code Support"
        ]
    }))
}

pub async fn not_found() -> ApiError {
    DefaultApiError::EndpointNotFound.value()
}
