use std::time::Duration;

use reqwest::Client;

/// Shared outbound client. `timeout` bounds a single attempt, not a retry sequence.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
