use serde::{Deserialize, Serialize};
use validator::Validate;

pub static DEFAULT_WIDTH: u32 = 1024;
pub static DEFAULT_HEIGHT: u32 = 1024;
pub static DEFAULT_GUIDANCE: f32 = 3.5;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateImageDto {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 1000,
        message = "prompt must be between 1 and 1000 characters."
    ))]
    pub prompt: String,
    #[validate(range(min = 256, max = 2048, message = "width must be between 256 and 2048."))]
    pub width: Option<u32>,
    #[validate(range(min = 256, max = 2048, message = "height must be between 256 and 2048."))]
    pub height: Option<u32>,
    #[validate(range(min = 0.0, max = 20.0, message = "guidance must be between 0 and 20."))]
    pub guidance: Option<f32>,
    #[validate(range(min = 1, max = 50, message = "num_steps must be between 1 and 50."))]
    pub num_steps: Option<u8>,
}

impl GenerateImageDto {
    pub fn sanitized(&self) -> Self {
        Self {
            prompt: self.prompt.trim().to_string(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(prompt: &str) -> GenerateImageDto {
        GenerateImageDto {
            prompt: prompt.to_string(),
            width: None,
            height: None,
            guidance: None,
            num_steps: None,
        }
    }

    #[test]
    fn whitespace_prompt_is_invalid_once_sanitized() {
        assert!(dto("   ").sanitized().validate().is_err());
        assert!(dto(" a red apple ").sanitized().validate().is_ok());
    }

    #[test]
    fn out_of_range_dimensions_are_invalid() {
        let mut too_wide = dto("a red apple");
        too_wide.width = Some(4096);
        assert!(too_wide.validate().is_err());

        let mut bad_guidance = dto("a red apple");
        bad_guidance.guidance = Some(-1.0);
        assert!(bad_guidance.validate().is_err());
    }
}
