pub fn api_url(base_url: &str, account_id: &str, model_name: &str) -> String {
    format!(
        "{}/accounts/{}/ai/run/{}",
        base_url.trim_end_matches('/'),
        account_id,
        model_name
    )
}
