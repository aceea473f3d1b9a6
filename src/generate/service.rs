use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    app::{
        models::api_error::ApiError,
        util::multipart::models::multipart_form::MultipartForm,
    },
    inference::{
        config::api_url,
        models::{inference_output::InferenceOutput, outbound_request::OutboundRequest},
    },
    AppState,
};

use super::{
    dtos::generate_json_dto::GenerateJsonDto,
    errors::GenerateApiError,
    models::generation_request::{GenerationRequest, MAX_REFERENCE_IMAGES},
};

pub fn multi_reference_request(
    form: MultipartForm,
    max_image_bytes: usize,
) -> Result<GenerationRequest, ApiError> {
    let prompt = form.field("prompt").map(str::trim).unwrap_or_default();
    let images: Vec<_> = form.files_named("images").cloned().collect();

    if prompt.is_empty() || images.is_empty() {
        return Err(GenerateApiError::ImagesRequired.value());
    }

    if images.len() > MAX_REFERENCE_IMAGES {
        return Err(GenerateApiError::TooManyImages(MAX_REFERENCE_IMAGES).value());
    }

    for image in &images {
        if !image.is_image() {
            return Err(GenerateApiError::NotAnImage(image.file_name.to_string()).value());
        }
        if image.data.len() > max_image_bytes {
            return Err(
                GenerateApiError::ImageTooLarge(image.file_name.to_string(), max_image_bytes)
                    .value(),
            );
        }
    }

    Ok(GenerationRequest::MultiReference {
        prompt: prompt.to_string(),
        images,
    })
}

pub fn json_request(dto: GenerateJsonDto) -> Result<GenerationRequest, ApiError> {
    match dto.json_prompt {
        Some(prompt_object @ Value::Object(_)) => {
            Ok(GenerationRequest::JsonControlled { prompt_object })
        }
        _ => Err(GenerateApiError::JsonPromptRequired.value()),
    }
}

pub async fn generate_image(
    request: &GenerationRequest,
    state: &AppState,
) -> Result<InferenceOutput, ApiError> {
    let outbound = OutboundRequest {
        url: api_url(
            state.envy.api_base_url(),
            &state.credentials.account_id,
            state.envy.model_name(),
        ),
        headers: state.credentials.headers(),
        parts: request.form_parts(),
    };

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id, mode = request.mode());

    match state.inference.submit(&outbound).instrument(span).await {
        Ok(output) => {
            tracing::info!(
                %request_id,
                mode = request.mode(),
                attempts = output.attempts,
                len = output.bytes.len(),
                "image generated"
            );
            Ok(output)
        }
        Err(e) => {
            tracing::error!(%request_id, mode = request.mode(), "generation failed: {}", e);
            Err(e.value())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::app::util::multipart::models::file_properties::FileProperties;

    fn image(field_name: &str, mime_type: mime::Mime, len: usize) -> FileProperties {
        FileProperties {
            field_name: field_name.to_string(),
            file_name: "ref.png".to_string(),
            mime_type,
            data: Bytes::from(vec![0u8; len]),
        }
    }

    fn form(prompt: Option<&str>, files: Vec<FileProperties>) -> MultipartForm {
        MultipartForm {
            fields: prompt
                .map(|prompt| vec![("prompt".to_string(), prompt.to_string())])
                .unwrap_or_default(),
            files,
        }
    }

    #[test]
    fn accepts_one_to_four_images() {
        for count in 1..=4 {
            let files = (0..count).map(|_| image("images", mime::IMAGE_PNG, 8)).collect();
            let request = multi_reference_request(form(Some("mix"), files), 1024).unwrap();

            match request {
                GenerationRequest::MultiReference { images, .. } => assert_eq!(images.len(), count),
                other => panic!("unexpected request: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_five_images() {
        let files = (0..5).map(|_| image("images", mime::IMAGE_PNG, 8)).collect();
        let error = multi_reference_request(form(Some("mix"), files), 1024).unwrap_err();

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "Maximum 4 images allowed");
    }

    #[test]
    fn rejects_missing_prompt_or_images() {
        let files = vec![image("images", mime::IMAGE_PNG, 8)];
        assert!(multi_reference_request(form(None, files), 1024).is_err());
        assert!(multi_reference_request(form(Some("mix"), vec![]), 1024).is_err());

        let wrong_field = vec![image("photos", mime::IMAGE_PNG, 8)];
        assert!(multi_reference_request(form(Some("mix"), wrong_field), 1024).is_err());
    }

    #[test]
    fn rejects_non_images_and_oversized_files() {
        let text = vec![image("images", mime::TEXT_PLAIN, 8)];
        let error = multi_reference_request(form(Some("mix"), text), 1024).unwrap_err();
        assert_eq!(error.code, StatusCode::BAD_REQUEST);

        let big = vec![image("images", mime::IMAGE_PNG, 2048)];
        let error = multi_reference_request(form(Some("mix"), big), 1024).unwrap_err();
        assert_eq!(error.code, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn json_prompt_must_be_an_object() {
        let ok = json_request(GenerateJsonDto {
            json_prompt: Some(json!({ "style": "minimalist" })),
        });
        assert!(matches!(ok, Ok(GenerationRequest::JsonControlled { .. })));

        for json_prompt in [None, Some(Value::Null), Some(json!("text")), Some(json!([1]))] {
            let error = json_request(GenerateJsonDto { json_prompt }).unwrap_err();
            assert_eq!(error.code, StatusCode::BAD_REQUEST);
            assert!(error.message.contains("modern website landing page"));
        }
    }
}
