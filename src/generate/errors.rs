use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

use super::dtos::generate_json_dto::example_payload;

#[derive(Debug)]
pub enum GenerateApiError {
    PromptRequired,
    ImagesRequired,
    TooManyImages(usize),
    NotAnImage(String),
    ImageTooLarge(String, usize),
    JsonPromptRequired,
}

impl GenerateApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::PromptRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Prompt is required".to_string(),
            },
            Self::ImagesRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Prompt and at least one image required. Send multipart/form-data with prompt and images field".to_string(),
            },
            Self::TooManyImages(max) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Maximum {} images allowed", max),
            },
            Self::NotAnImage(file_name) => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!("Only image files are allowed ({})", file_name),
            },
            Self::ImageTooLarge(file_name, max_bytes) => ApiError {
                code: StatusCode::PAYLOAD_TOO_LARGE,
                message: format!("{} exceeds the {} byte limit", file_name, max_bytes),
            },
            Self::JsonPromptRequired => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: format!(
                    "JSON prompt is required, e.g. {}",
                    example_payload()
                ),
            },
        }
    }
}
