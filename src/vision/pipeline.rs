// encode → build → send → extract

use super::models::{AnalysisRequest, RawResponse};
use super::{build_request, encode, extract_answer};
use crate::credentials::Credential;
use crate::error::{Result, VisionError};
use std::future::Future;
use tracing::{debug, warn};

/// Something that can deliver one [`AnalysisRequest`] upstream.
pub trait ChatTransport {
    /// Issue exactly one request. Non-2xx replies are returned, not raised.
    fn send(&self, request: &AnalysisRequest) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// Ask one question about one image.
///
/// The credential check comes first: when it is missing nothing is encoded
/// and nothing is sent. Every later failure is terminal for this call.
pub async fn analyze<T>(
    transport: &T,
    credential: Option<&Credential>,
    image: &[u8],
    question: &str,
    api_key_env: &str,
) -> Result<String>
where
    T: ChatTransport + Sync,
{
    let credential =
        credential.ok_or_else(|| VisionError::MissingCredential(api_key_env.to_string()))?;

    let base64_image = encode(image)?;
    analyze_encoded(transport, credential, &base64_image, question).await
}

/// Same as [`analyze`] for an image that is already base64-encoded.
pub async fn analyze_encoded<T>(
    transport: &T,
    credential: &Credential,
    base64_image: &str,
    question: &str,
) -> Result<String>
where
    T: ChatTransport + Sync,
{
    let request = build_request(credential, base64_image, question)?;
    let response = transport.send(&request).await?;

    debug!("Upstream replied with HTTP {}", response.status);
    if !response.is_success() {
        warn!(
            "Upstream returned HTTP {}: {}",
            response.status,
            crate::utils::logging::sanitize(&truncate(&response.body, 500))
        );
    }

    extract_answer(&response.body)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
