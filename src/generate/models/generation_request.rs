use serde_json::Value;

use crate::{
    app::util::multipart::models::file_properties::FileProperties,
    generate::dtos::generate_image_dto::{
        GenerateImageDto, DEFAULT_GUIDANCE, DEFAULT_HEIGHT, DEFAULT_WIDTH,
    },
    inference::models::outbound_request::FormPart,
};

pub static MAX_REFERENCE_IMAGES: usize = 4;

#[derive(Debug, Clone)]
pub enum GenerationRequest {
    TextPrompt {
        prompt: String,
        width: u32,
        height: u32,
        guidance: f32,
        num_steps: Option<u8>,
    },
    MultiReference {
        prompt: String,
        images: Vec<FileProperties>,
    },
    JsonControlled {
        prompt_object: Value,
    },
}

impl GenerationRequest {
    pub fn from_dto(dto: &GenerateImageDto) -> Self {
        Self::TextPrompt {
            prompt: dto.prompt.to_string(),
            width: dto.width.unwrap_or(DEFAULT_WIDTH),
            height: dto.height.unwrap_or(DEFAULT_HEIGHT),
            guidance: dto.guidance.unwrap_or(DEFAULT_GUIDANCE),
            num_steps: dto.num_steps,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::TextPrompt { .. } => "text",
            Self::MultiReference { .. } => "multi_reference",
            Self::JsonControlled { .. } => "json",
        }
    }

    /// Form fields in the order the inference API receives them.
    pub fn form_parts(&self) -> Vec<FormPart> {
        match self {
            Self::TextPrompt {
                prompt,
                width,
                height,
                guidance,
                num_steps,
            } => {
                let mut parts = vec![
                    FormPart::text("prompt", prompt),
                    FormPart::text("width", width),
                    FormPart::text("height", height),
                    FormPart::text("guidance", guidance),
                ];
                if let Some(num_steps) = num_steps {
                    parts.push(FormPart::text("num_steps", num_steps));
                }
                parts
            }
            Self::MultiReference { prompt, images } => {
                let mut parts = Vec::with_capacity(images.len() + 1);
                parts.push(FormPart::text("prompt", prompt));
                for (index, image) in images.iter().enumerate() {
                    parts.push(FormPart::File {
                        name: format!("input_image_{}", index),
                        file_name: image.file_name.to_string(),
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    });
                }
                parts
            }
            Self::JsonControlled { prompt_object } => {
                vec![FormPart::text("prompt", prompt_object)]
            }
        }
    }
}
