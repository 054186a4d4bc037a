//! Axum-based HTTP front-end for vision-ask.
//!
//! A thin JSON API over the core: upload an image, then ask questions about
//! it. The server owns the image session cache; the request builder never
//! sees it.
//!
//! # Components
//!
//! - `handlers`: Upload, question, health and metrics endpoints.
//! - `middleware`: Request ID tracking.
//! - `routes`: Router and shared state.

mod handlers;
mod middleware;
mod routes;

pub use handlers::{AnswerResponse, QuestionRequest, UploadResponse};
pub use routes::{create_router, AppState};
