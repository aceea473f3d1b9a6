use serde::Deserialize;

pub static DEFAULT_MODEL_NAME: &str = "@cf/black-forest-labs/flux-2-dev";
pub static DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub cloudflare_account_id: String,
    pub cloudflare_api_token: String,
    pub model_name: Option<String>,
    pub api_base_url: Option<String>,

    pub max_retries: Option<u32>,
    pub base_delay_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub deadline_secs: Option<u64>,
    pub capacity_markers: Option<Vec<String>>,

    pub max_image_bytes: Option<usize>,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Envy {
    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL_NAME)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes.unwrap_or(5 * 1024 * 1024)
    }

    /// Body limit for inbound requests: room for four full-size images plus form overhead.
    pub fn max_body_bytes(&self) -> usize {
        self.max_image_bytes() * 4 + 1024 * 1024
    }
}
