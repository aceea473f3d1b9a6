use axum::http::StatusCode;

use super::models::api_error::ApiError;

#[derive(Debug)]
pub enum DefaultApiError {
    InternalServerError,
    EndpointNotFound,
    PayloadTooLarge(usize),
}

impl DefaultApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::InternalServerError => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "An internal server error occurred.".to_string(),
            },
            Self::EndpointNotFound => ApiError {
                code: StatusCode::NOT_FOUND,
                message: "Endpoint not found".to_string(),
            },
            Self::PayloadTooLarge(max_bytes) => ApiError {
                code: StatusCode::PAYLOAD_TOO_LARGE,
                message: format!("Request body exceeds the {} byte limit", max_bytes),
            },
        }
    }
}
