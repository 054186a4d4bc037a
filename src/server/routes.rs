// HTTP routes configuration

use super::handlers::{health_handler, metrics_handler, question_handler, upload_handler};
use super::middleware::request_id_layers;
use crate::config::AppConfig;
use crate::credentials::Credential;
use crate::error::Result;
use crate::openai::OpenAiClient;
use crate::session::ImageSession;
use crate::upload::UploadStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: Arc<OpenAiClient>,
    /// Resolved once at startup; `None` keeps the server up but every
    /// question fails with a missing-credential error.
    pub credential: Option<Arc<Credential>>,
    pub uploads: UploadStore,
    pub session: ImageSession,
}

impl AppState {
    pub fn new(config: AppConfig, client: OpenAiClient, credential: Option<Credential>) -> Self {
        let uploads = UploadStore::new(&config.uploads);
        let session = ImageSession::new(config.uploads.session_capacity);
        Self {
            config,
            client: Arc::new(client),
            credential: credential.map(Arc::new),
            uploads,
            session,
        }
    }
}

pub fn create_router(state: AppState) -> Result<Router> {
    let max_body_bytes = state.config.server.max_body_bytes;
    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/v1/images", post(upload_handler))
        .route("/v1/questions", post(question_handler))
        // Multipart uploads are bounded by the tower-http limit below instead
        .layer(DefaultBodyLimit::disable())
        .layer(tower_http::limit::RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
