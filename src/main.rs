use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    http::Method,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

use crate::{
    app::{envy::Envy, util::reqwest::build_client},
    inference::{
        classifier::CapacityMatcher,
        client::RetryingClient,
        models::credentials::Credentials,
        policy::{RetryPolicy, DEFAULT_BASE_DELAY_MS, DEFAULT_MAX_RETRIES},
    },
};

mod app;
mod generate;
mod inference;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
    pub credentials: Credentials,
    pub inference: RetryingClient,
}

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("flux_proxy=debug,tower_http=info")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let _ = dotenvy::dotenv();
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("missing configuration: {:#?}", e),
    };
    let credentials = match Credentials::from_envy(&envy) {
        Ok(credentials) => credentials,
        Err(e) => panic!("invalid credentials: {}", e),
    };

    // inference
    let timeout = Duration::from_secs(envy.request_timeout_secs.unwrap_or(120));
    let http = build_client(timeout).expect("failed to build http client");
    let policy = RetryPolicy::new(
        envy.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        Duration::from_millis(envy.base_delay_ms.unwrap_or(DEFAULT_BASE_DELAY_MS)),
    )
    .with_deadline(envy.deadline_secs.map(Duration::from_secs));
    let capacity = match &envy.capacity_markers {
        Some(markers) => CapacityMatcher::markers(markers.iter().map(|m| m.trim().to_string())),
        None => CapacityMatcher::default(),
    };

    tracing::info!(
        app_env = %envy.app_env,
        model = envy.model_name(),
        max_retries = policy.max_retries,
        base_delay = ?policy.base_delay,
        "inference client configured"
    );

    let port = envy.port.unwrap_or(3000);
    let state = AppState {
        envy: Arc::new(envy),
        credentials,
        inference: RetryingClient::new(http, policy, capacity),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await
        .expect("server error");
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::POST, Method::GET]);
    let max_body_bytes = state.envy.max_body_bytes();

    Router::new()
        .route("/", get(app::controller::get_root))
        // generate
        .route("/api/generate", post(generate::controller::generate_image))
        .route(
            "/api/generate/multi",
            post(generate::controller::generate_multi_reference),
        )
        .route("/api/generate/json", post(generate::controller::generate_json))
        .fallback(app::controller::not_found)
        // layers
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
        .layer(cors)
        .with_state(state)
}
