use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::{
    app::{
        models::{api_error::ApiError, json_from_request::JsonFromRequest},
        util::multipart::multipart::{check_content_length, get_form},
    },
    inference::models::inference_output::InferenceOutput,
    AppState,
};

use super::{
    dtos::{generate_image_dto::GenerateImageDto, generate_json_dto::GenerateJsonDto},
    errors::GenerateApiError,
    models::generation_request::GenerationRequest,
    service,
};

pub async fn generate_image(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<GenerateImageDto>,
) -> Result<Response, ApiError> {
    let dto = dto.sanitized();
    if dto.prompt.is_empty() {
        return Err(GenerateApiError::PromptRequired.value());
    }
    if let Err(e) = dto.validate() {
        return Err(ApiError {
            code: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        });
    }

    tracing::info!("generating image: {:?}", dto.prompt);
    let request = GenerationRequest::from_dto(&dto);

    service::generate_image(&request, &state)
        .await
        .map(image_response)
}

pub async fn generate_multi_reference(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    check_content_length(&headers, state.envy.max_body_bytes())?;
    let form = get_form(multipart).await?;
    let request = service::multi_reference_request(form, state.envy.max_image_bytes())?;

    if let GenerationRequest::MultiReference { prompt, images } = &request {
        tracing::info!(
            "multi-ref generation with {} images: {:?}",
            images.len(),
            prompt
        );
    }

    service::generate_image(&request, &state)
        .await
        .map(image_response)
}

pub async fn generate_json(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<GenerateJsonDto>,
) -> Result<Response, ApiError> {
    let request = service::json_request(dto)?;

    if let GenerationRequest::JsonControlled { prompt_object } = &request {
        tracing::info!("json generation: {}", prompt_object);
    }

    service::generate_image(&request, &state)
        .await
        .map(image_response)
}

fn image_response(output: InferenceOutput) -> Response {
    let content_type = output
        .content_type
        .filter(|content_type| content_type.starts_with("image/"))
        .unwrap_or_else(|| mime::IMAGE_PNG.to_string());

    ([(header::CONTENT_TYPE, content_type)], output.bytes).into_response()
}
