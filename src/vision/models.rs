// Vision request/response wire types

use crate::credentials::Credential;
use crate::error::Result;
use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Model every request is sent to.
pub const MODEL: &str = "gpt-4-vision-preview";

/// Upper bound on generated tokens per answer.
pub const MAX_TOKENS: u32 = 300;

/// The image part is always labelled JPEG, whatever the upload's real format.
pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Outcome of one question-about-image request.
pub type AnalysisResult = Result<String>;

/// Body of a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// A validated, ready-to-send request. Lives for a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub(crate) credential: Credential,
    pub(crate) payload: ChatCompletionRequest,
}

impl AnalysisRequest {
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn payload(&self) -> &ChatCompletionRequest {
        &self.payload
    }

    /// Serialized JSON body, exactly as it goes on the wire.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.payload)
            .map_err(|e| crate::error::VisionError::Internal(format!("JSON encode: {}", e)))
    }
}

/// Status and body of an upstream reply, untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// Response side: every field optional so structural gaps surface as
// MalformedResponse instead of a serde error.

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Option<Vec<Choice>>,
    /// Only read for its `message` text; never validated.
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<serde_json::Value>,
}

/// Image formats the upload side accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

static EXTENSIONS: phf::Map<&'static str, ImageFormat> = phf_map! {
    "jpg" => ImageFormat::Jpeg,
    "jpeg" => ImageFormat::Jpeg,
    "png" => ImageFormat::Png,
};

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Look up a format by file extension (case-insensitive, no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        EXTENSIONS.get(ext.to_ascii_lowercase().as_str()).copied()
    }

    /// Look up a format from a file name's extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        std::path::Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}
