use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

use crate::app::{errors::DefaultApiError, models::api_error::ApiError};

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("failed to reach inference API: {0}")]
    Transport(String),
    #[error("inference API is temporarily unavailable ({status}): {body}")]
    TransientUpstream { status: u16, body: String },
    #[error("inference API error ({status}): {body}")]
    TerminalUpstream { status: u16, body: String },
    #[error("empty payload from upstream")]
    EmptyPayload,
    #[error("gave up after {attempts} attempts: {cause}")]
    RetriesExhausted {
        attempts: u32,
        cause: Box<InferenceError>,
    },
    #[error("inference request did not complete within {0:?}")]
    DeadlineExceeded(Duration),
    #[error("invalid outbound request: {0}")]
    InvalidRequest(String),
}

impl InferenceError {
    /// Transport failures and transient upstream statuses are retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::TransientUpstream { .. })
    }

    pub fn value(&self) -> ApiError {
        if let Self::InvalidRequest(_) = self {
            return DefaultApiError::InternalServerError.value();
        }

        let code = match self {
            Self::Transport(_) | Self::TerminalUpstream { .. } | Self::EmptyPayload => {
                StatusCode::BAD_GATEWAY
            }
            Self::TransientUpstream { .. } | Self::RetriesExhausted { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::InvalidRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        ApiError {
            code,
            message: self.to_string(),
        }
    }
}
