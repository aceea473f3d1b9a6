use axum::{
    extract::Multipart,
    http::{header::CONTENT_LENGTH, HeaderMap, StatusCode},
};

use crate::app::{errors::DefaultApiError, models::api_error::ApiError};

use super::models::{file_properties::FileProperties, multipart_form::MultipartForm};

/// Rejects a body whose declared length is over `max_bytes` before any of it is read.
pub fn check_content_length(headers: &HeaderMap, max_bytes: usize) -> Result<(), ApiError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    match declared {
        Some(len) if len > max_bytes => Err(DefaultApiError::PayloadTooLarge(max_bytes).value()),
        _ => Ok(()),
    }
}

/// Text parts are those without a file name whose content type, if any, is `text/*`.
pub fn is_file_part(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    if file_name.is_some() {
        return true;
    }

    match content_type {
        Some(content_type) => !content_type.trim().to_ascii_lowercase().starts_with("text/"),
        None => false,
    }
}

/// Drains a multipart body into text fields and files.
pub async fn get_form(mut multipart: Multipart) -> Result<MultipartForm, ApiError> {
    let mut form = MultipartForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(%e);
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: e.to_string(),
                });
            }
        };

        let field_name = field.name().unwrap_or("file").to_string();
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string());
        let is_file = is_file_part(file_name.as_deref(), field.content_type());

        if !is_file {
            match field.text().await {
                Ok(text) => form.fields.push((field_name, text)),
                Err(e) => {
                    tracing::warn!(%e);
                    return Err(ApiError {
                        code: StatusCode::BAD_REQUEST,
                        message: e.to_string(),
                    });
                }
            }
            continue;
        }

        let mime_type = field
            .content_type()
            .and_then(|content_type| content_type.parse().ok())
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        let file_name =
            file_name.unwrap_or_else(|| format!("image_{}.jpg", form.files.len()));

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(%e);
                return Err(ApiError {
                    code: StatusCode::BAD_REQUEST,
                    message: e.to_string(),
                });
            }
        };

        form.files.push(FileProperties {
            field_name,
            file_name,
            mime_type,
            data,
        });
    }

    Ok(form)
}
