// HTTP request handlers

use super::routes::AppState;
use crate::error::{Result, VisionError};
use crate::metrics;
use crate::utils::logging::sanitize;
use crate::vision::analyze_encoded;
use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    let credential_check = if state.credential.is_some() {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("{} is set", state.config.openai.api_key_env),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "error".to_string(),
            message: format!("{} is not set", state.config.openai.api_key_env),
        }
    };
    checks.insert("credential".to_string(), credential_check);

    checks.insert(
        "upstream".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Endpoint: {}", state.client.endpoint()),
        },
    );

    checks.insert(
        "session".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("{} cached image(s)", state.session.len()),
        },
    );

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub image_id: String,
    pub file_name: String,
    pub size_bytes: usize,
}

/// Handler for `POST /v1/images` (multipart field `file`)
pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let result = store_upload(&state, multipart).await;
    match &result {
        Ok(_) => metrics::record_upload("stored"),
        Err(e) => {
            warn!("Upload rejected: {}", loggable(e));
            metrics::record_upload(e.kind().as_str());
        }
    }
    result.map(Json)
}

async fn store_upload(state: &AppState, mut multipart: Multipart) -> Result<UploadResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| VisionError::Validation(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| VisionError::Validation("file field has no file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| VisionError::Validation(format!("failed to read upload: {}", e)))?;

        let stored = state.uploads.save(&file_name, &bytes).await?;
        let cached = state.session.remember(&bytes)?;

        info!(
            "Image {} is now current ({} bytes)",
            stored.file_name, stored.size_bytes
        );

        return Ok(UploadResponse {
            image_id: cached.content_hash,
            file_name: stored.file_name,
            size_bytes: stored.size_bytes,
        });
    }

    Err(VisionError::Validation(
        "multipart body has no \"file\" field".to_string(),
    ))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    /// Content hash returned by the upload endpoint; defaults to the latest upload.
    #[serde(default)]
    pub image_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// Handler for `POST /v1/questions`
///
/// A body that does not parse is a `validation_error`, like any other bad input.
pub async fn question_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<AnswerResponse>> {
    let result = match parse_question(&body) {
        Ok(req) => answer_question(&state, &req).await,
        Err(e) => Err(e),
    };
    match &result {
        Ok(_) => metrics::record_analysis("answered"),
        Err(e) => {
            warn!("Question failed: {}", loggable(e));
            metrics::record_analysis(e.kind().as_str());
        }
    }
    result.map(|answer| Json(AnswerResponse { answer }))
}

fn parse_question(body: &str) -> Result<QuestionRequest> {
    serde_json::from_str(body)
        .map_err(|e| VisionError::Validation(format!("invalid question body: {}", e)))
}

// Provider messages can echo the key back, so error text is scrubbed before logging.
fn loggable(e: &VisionError) -> String {
    sanitize(&e.to_string())
}

async fn answer_question(state: &AppState, req: &QuestionRequest) -> Result<String> {
    // Credential first: nothing is looked up or sent without it.
    let credential = state
        .credential
        .as_deref()
        .ok_or_else(|| VisionError::MissingCredential(state.config.openai.api_key_env.clone()))?;

    let image = match &req.image_id {
        Some(id) => state
            .session
            .get(id)
            .ok_or_else(|| VisionError::Validation(format!("unknown image_id {}", id)))?,
        None => state
            .session
            .current()
            .ok_or_else(|| VisionError::Validation("no image has been uploaded".to_string()))?,
    };

    info!(
        "Answering question about image {}",
        &image.content_hash[..16.min(image.content_hash.len())]
    );
    analyze_encoded(state.client.as_ref(), credential, &image.base64, &req.question).await
}
