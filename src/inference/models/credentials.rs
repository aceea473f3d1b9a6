use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::app::envy::Envy;

#[derive(Clone)]
pub struct Credentials {
    pub account_id: String,
    api_token: String,
}

impl Credentials {
    pub fn new(account_id: &str, api_token: &str) -> Result<Self, String> {
        let account_id = account_id.trim();
        let api_token = api_token.trim();

        if account_id.is_empty() {
            return Err("CLOUDFLARE_ACCOUNT_ID must not be empty".to_string());
        }
        if api_token.is_empty() {
            return Err("CLOUDFLARE_API_TOKEN must not be empty".to_string());
        }
        if HeaderValue::from_str(&format!("Bearer {}", api_token)).is_err() {
            return Err("CLOUDFLARE_API_TOKEN is not a valid header value".to_string());
        }

        Ok(Self {
            account_id: account_id.to_string(),
            api_token: api_token.to_string(),
        })
    }

    pub fn from_envy(envy: &Envy) -> Result<Self, String> {
        Self::new(&envy.cloudflare_account_id, &envy.cloudflare_api_token)
    }

    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(mut value) = HeaderValue::from_str(&format!("Bearer {}", self.api_token)) {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("api_token", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_are_rejected() {
        assert!(Credentials::new("", "token").is_err());
        assert!(Credentials::new("account", "   ").is_err());
        assert!(Credentials::new("account", "bad\ntoken").is_err());
    }

    #[test]
    fn headers_carry_bearer_token() {
        let credentials = Credentials::new("account", "secret").unwrap();
        let headers = credentials.headers();

        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret");
        assert!(!format!("{:?}", credentials).contains("secret"));
    }
}
