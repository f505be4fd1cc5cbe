//! HTTP client for the external image and video generation services.
//!
//! Implements [`MediaGenPort`] with bounded retries and linear backoff
//! (`backoff_base * attempt` ms). Video calls are additionally raced
//! against a request-level timeout because the upstream job can hang; a
//! timeout ends the whole call immediately without consuming the backoff
//! wait. Both services answer with a JSON body whose result URL may sit at
//! several possible key paths.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::time::{sleep, timeout};

use crate::infrastructure::ports::{ImageRequest, MediaGenError, MediaGenPort, VideoRequest};
use crate::infrastructure::settings::EngineSettings;

/// Client for the generation services.
#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    image_endpoint: String,
    video_endpoint: String,
    api_key: Option<String>,
    backoff_base_ms: u64,
    video_timeout_secs: u64,
}

impl GenerationClient {
    pub fn new(settings: &EngineSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            image_endpoint: settings.image_endpoint.trim_end_matches('/').to_string(),
            video_endpoint: settings.video_endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            backoff_base_ms: settings.backoff_base_ms,
            video_timeout_secs: settings.video_timeout_secs,
        }
    }

    /// Linear backoff: `backoff_base * attempt` milliseconds.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_base_ms.saturating_mul(attempt as u64))
    }

    async fn post_for_url(&self, endpoint: &str, body: &Value) -> Result<String, MediaGenError> {
        let mut request = self.client.post(endpoint).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MediaGenError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MediaGenError::RequestFailed(format!(
                "{status}: {error_text}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| MediaGenError::RequestFailed(e.to_string()))?;

        extract_result_url(&body).ok_or_else(|| {
            MediaGenError::RequestFailed("no result URL in response body".to_string())
        })
    }

    /// Retry `operation` up to `attempts` times with linear backoff between
    /// failures. Timeouts are not retried: the upstream job already burned
    /// minutes, so the attempt budget is abandoned immediately.
    async fn with_retries<F, Fut>(
        &self,
        operation_name: &str,
        attempts: u32,
        operation: F,
    ) -> Result<String, MediaGenError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<String, MediaGenError>>,
    {
        let attempts = attempts.max(1);
        let mut last_error = MediaGenError::Unavailable;

        for attempt in 1..=attempts {
            match operation().await {
                Ok(url) => {
                    if attempt > 1 {
                        tracing::info!(
                            attempt,
                            operation = operation_name,
                            "generation succeeded after retry"
                        );
                    }
                    return Ok(url);
                }
                Err(e @ MediaGenError::Timeout(_)) => {
                    tracing::warn!(
                        attempt,
                        operation = operation_name,
                        error = %e,
                        "generation timed out, abandoning attempt budget"
                    );
                    return Err(e);
                }
                Err(e) => {
                    if attempt < attempts {
                        let delay = self.backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            max_attempts = attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            operation = operation_name,
                            "generation failed, retrying"
                        );
                        sleep(delay).await;
                    }
                    last_error = e;
                }
            }
        }

        tracing::error!(
            attempts,
            error = %last_error,
            operation = operation_name,
            "generation failed after all attempts"
        );
        Err(last_error)
    }
}

#[async_trait]
impl MediaGenPort for GenerationClient {
    async fn generate_image(&self, request: ImageRequest) -> Result<String, MediaGenError> {
        if self.image_endpoint.is_empty() {
            return Err(MediaGenError::Unavailable);
        }

        let body = json!({
            "prompt": request.prompt,
            "image_size": {
                "width": request.width,
                "height": request.height,
            },
            "num_inference_steps": request.steps,
            "enable_safety_checker": request.enable_safety_checker,
        });

        self.with_retries("image", request.attempts, || {
            self.post_for_url(&self.image_endpoint, &body)
        })
        .await
    }

    async fn generate_video(&self, request: VideoRequest) -> Result<String, MediaGenError> {
        if self.video_endpoint.is_empty() {
            return Err(MediaGenError::Unavailable);
        }

        let body = json!({
            "prompt": request.prompt,
            "duration": request.duration_secs,
            "aspect_ratio": request.aspect_ratio,
            "resolution": request.resolution,
            "fps": request.fps,
            "seed": request.seed,
        });

        let timeout_secs = self.video_timeout_secs;
        self.with_retries("video", request.attempts, || async {
            match timeout(
                Duration::from_secs(timeout_secs),
                self.post_for_url(&self.video_endpoint, &body),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(MediaGenError::Timeout(timeout_secs)),
            }
        })
        .await
    }

    async fn check_health(&self) -> Result<bool, MediaGenError> {
        let response = self
            .client
            .head(&self.image_endpoint)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|_| MediaGenError::Unavailable)?;

        let status = response.status();
        Ok(status.is_success() || status == reqwest::StatusCode::METHOD_NOT_ALLOWED)
    }
}

/// Pull the result URL out of a generation response body.
///
/// The services disagree on where the URL lives; tolerate every shape seen
/// in the wild: `data[0].url`, `url`, `video.url`, `video` (string),
/// `video_url`.
fn extract_result_url(body: &Value) -> Option<String> {
    if let Some(url) = body
        .get("data")
        .and_then(|d| d.get(0))
        .and_then(|first| first.get("url"))
        .and_then(Value::as_str)
    {
        return Some(url.to_string());
    }
    if let Some(url) = body.get("url").and_then(Value::as_str) {
        return Some(url.to_string());
    }
    if let Some(video) = body.get("video") {
        if let Some(url) = video.get("url").and_then(Value::as_str) {
            return Some(url.to_string());
        }
        if let Some(url) = video.as_str() {
            return Some(url.to_string());
        }
    }
    if let Some(url) = body.get("video_url").and_then(Value::as_str) {
        return Some(url.to_string());
    }
    None
}
