// OpenAI chat completion client

use crate::config::OpenAiConfig;
use crate::error::{Result, VisionError};
use crate::metrics;
use crate::vision::{AnalysisRequest, ChatTransport, RawResponse};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Client for an OpenAI-compatible chat completion endpoint.
///
/// Sends each request exactly once. There is no retry layer: any HTTP status
/// the service answers with is handed back to the caller untouched.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: Client,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| VisionError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/chat/completions",
            config.api_base_url.trim_end_matches('/')
        );
        debug!("Chat completion endpoint: {}", endpoint);

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the request body with bearer auth and return status + body.
    pub async fn send(&self, request: &AnalysisRequest) -> Result<RawResponse> {
        let body = request.to_json()?;
        info!(
            "Sending analysis request to {} ({} byte body)",
            self.endpoint,
            body.len()
        );

        let started = Instant::now();
        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", request.credential().bearer())
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", self.endpoint, e);
                metrics::record_upstream_call("network_error", started.elapsed().as_secs_f64());
                VisionError::Network(describe_transport_error(&e))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            VisionError::Network(format!("failed to read response body: {}", e))
        })?;

        metrics::record_upstream_call(&status.to_string(), started.elapsed().as_secs_f64());
        debug!(
            "Received HTTP {} ({} bytes) in {:?}",
            status,
            body.len(),
            started.elapsed()
        );

        Ok(RawResponse { status, body })
    }
}

impl ChatTransport for OpenAiClient {
    async fn send(&self, request: &AnalysisRequest) -> Result<RawResponse> {
        OpenAiClient::send(self, request).await
    }
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("could not connect: {}", err)
    } else {
        err.to_string()
    }
}
