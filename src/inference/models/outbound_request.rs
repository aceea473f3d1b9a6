use bytes::Bytes;
use mime::Mime;
use reqwest::{
    header::HeaderMap,
    multipart::{Form, Part},
};

use crate::inference::errors::InferenceError;

#[derive(Debug, Clone)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime_type: Mime,
        data: Bytes,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl ToString) -> Self {
        Self::Text {
            name: name.into(),
            value: value.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// A fully-formed request. The body is kept as parts so every attempt sends the same form.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub parts: Vec<FormPart>,
}

impl OutboundRequest {
    pub fn to_form(&self) -> Result<Form, InferenceError> {
        let mut form = Form::new();

        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File {
                    name,
                    file_name,
                    mime_type,
                    data,
                } => {
                    let file = Part::stream(data.clone())
                        .file_name(file_name.clone())
                        .mime_str(mime_type.as_ref())
                        .map_err(|e| InferenceError::InvalidRequest(e.to_string()))?;
                    form.part(name.clone(), file)
                }
            };
        }

        Ok(form)
    }

    pub fn body_len(&self) -> usize {
        self.parts
            .iter()
            .map(|part| match part {
                FormPart::Text { value, .. } => value.len(),
                FormPart::File { data, .. } => data.len(),
            })
            .sum()
    }
}
