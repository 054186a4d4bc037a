//! Image-question request building and answer extraction.
//!
//! This is the core of vision-ask: turning (credential, image bytes, question)
//! into a chat completion request and turning the reply into a single answer
//! string. Everything here is pure except [`pipeline::analyze`], which drives
//! a [`pipeline::ChatTransport`].
//!
//! # Submodules
//!
//! - `models`: Wire types, fixed model constants and accepted image formats.
//! - `request`: Base64 encoding and request construction.
//! - `response`: Answer extraction.
//! - `pipeline`: The linear encode → build → send → extract sequence.

pub mod models;
pub mod pipeline;
pub mod request;
pub mod response;

pub use models::{AnalysisRequest, AnalysisResult, ImageFormat, RawResponse};
pub use pipeline::{analyze, analyze_encoded, ChatTransport};
pub use request::{build_request, encode, encode_file, read_image};
pub use response::extract_answer;
