use reqwest::{header::CONTENT_TYPE, Client};
use tokio_retry::RetryIf;

use super::{
    classifier::{classify, CapacityMatcher, FailureKind},
    errors::InferenceError,
    models::{
        inference_output::InferenceOutput, outbound_attempt::OutboundAttempt,
        outbound_request::{FormPart, OutboundRequest},
    },
    policy::RetryPolicy,
};

/// Submits requests to the inference API, retrying rate limits, capacity errors and
/// transport failures with exponential backoff. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct RetryingClient {
    http: Client,
    policy: RetryPolicy,
    capacity: CapacityMatcher,
}

impl RetryingClient {
    pub fn new(http: Client, policy: RetryPolicy, capacity: CapacityMatcher) -> Self {
        Self {
            http,
            policy,
            capacity,
        }
    }

    /// Dropping the returned future cancels the in-flight attempt and any pending wait.
    pub async fn submit(&self, request: &OutboundRequest) -> Result<InferenceOutput, InferenceError> {
        let Some(deadline) = self.policy.deadline else {
            return self.submit_with_retry(request).await;
        };

        match tokio::time::timeout(deadline, self.submit_with_retry(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(url = %request.url, ?deadline, "inference request timed out");
                Err(InferenceError::DeadlineExceeded(deadline))
            }
        }
    }

    async fn submit_with_retry(
        &self,
        request: &OutboundRequest,
    ) -> Result<InferenceOutput, InferenceError> {
        let max_attempts = self.policy.max_attempts();
        let delays = self.policy.delays().enumerate().map(move |(index, delay)| {
            tracing::warn!(
                "retrying in {:?} (attempt {}/{})",
                delay,
                index + 2,
                max_attempts
            );
            delay
        });

        let mut attempts: u32 = 0;
        let result = RetryIf::start(
            delays,
            || {
                let index = attempts;
                attempts += 1;
                self.attempt(request, index)
            },
            |e: &InferenceError| e.is_retryable(),
        )
        .await;

        match result {
            Ok(output) => Ok(output),
            Err(e) if e.is_retryable() => {
                tracing::error!("inference request failed after {} attempts: {}", attempts, e);
                Err(InferenceError::RetriesExhausted {
                    attempts,
                    cause: Box::new(e),
                })
            }
            Err(e) => {
                tracing::error!("inference request failed: {}", e);
                Err(e)
            }
        }
    }

    async fn attempt(
        &self,
        request: &OutboundRequest,
        index: u32,
    ) -> Result<InferenceOutput, InferenceError> {
        let attempt = OutboundAttempt::new(index, &request.url, request.body_len());
        tracing::debug!(
            attempt = attempt.index + 1,
            started_at_ms = %attempt.started_at_ms,
            url = attempt.url,
            body_len = attempt.body_len,
            fields = ?request.parts.iter().map(FormPart::name).collect::<Vec<_>>(),
            "sending inference request"
        );

        let form = request.to_form()?;
        let result = self
            .http
            .post(&request.url)
            .headers(request.headers.clone())
            .multipart(form)
            .send()
            .await;

        let res = match result {
            Ok(res) => res,
            Err(e) => {
                tracing::warn!(attempt = attempt.index + 1, %e);
                return Err(InferenceError::Transport(e.to_string()));
            }
        };

        let status = res.status();

        if status.is_success() {
            let content_type = res
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string());

            let bytes = match res.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(attempt = attempt.index + 1, %e);
                    return Err(InferenceError::Transport(e.to_string()));
                }
            };

            if bytes.is_empty() {
                return Err(InferenceError::EmptyPayload);
            }

            tracing::debug!(
                attempt = attempt.index + 1,
                len = bytes.len(),
                "inference request succeeded"
            );

            return Ok(InferenceOutput {
                bytes,
                content_type,
                attempts: index + 1,
            });
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(attempt = attempt.index + 1, %status, %e);
                return Err(InferenceError::Transport(e.to_string()));
            }
        };

        match classify(status, &body, &self.capacity) {
            FailureKind::Transient => {
                tracing::warn!(attempt = attempt.index + 1, %status, "transient upstream failure");
                Err(InferenceError::TransientUpstream {
                    status: status.as_u16(),
                    body,
                })
            }
            FailureKind::Terminal => Err(InferenceError::TerminalUpstream {
                status: status.as_u16(),
                body,
            }),
        }
    }
}
