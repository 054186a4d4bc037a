// Image encoding and request construction

use super::models::{
    AnalysisRequest, ChatCompletionRequest, ChatMessage, ContentPart, ImageUrl, DATA_URI_PREFIX,
    MAX_TOKENS, MODEL,
};
use crate::credentials::Credential;
use crate::error::{Result, VisionError};
use base64::Engine;
use std::path::Path;
use tracing::debug;

/// Base64-encode raw image bytes (standard alphabet, padded, unwrapped).
pub fn encode(image: &[u8]) -> Result<String> {
    if image.is_empty() {
        return Err(VisionError::Encoding("image is empty".to_string()));
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(image);
    debug!("Encoded {} image bytes to {} base64 chars", image.len(), encoded.len());
    Ok(encoded)
}

/// Read an image file. Unreadable files are an encoding failure.
pub async fn read_image(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    tokio::fs::read(path)
        .await
        .map_err(|e| VisionError::Encoding(format!("cannot read {}: {}", path.display(), e)))
}

/// Read an image file and base64-encode it.
pub async fn encode_file(path: impl AsRef<Path>) -> Result<String> {
    encode(&read_image(path).await?)
}

/// Build the chat completion request for one question about one image.
///
/// Fails with [`VisionError::Validation`] if the credential, the encoded
/// image or the question is empty; no request may be sent in that case.
pub fn build_request(
    credential: &Credential,
    base64_image: &str,
    question: &str,
) -> Result<AnalysisRequest> {
    if credential.is_empty() {
        return Err(VisionError::Validation("credential must not be empty".to_string()));
    }
    if base64_image.is_empty() {
        return Err(VisionError::Validation("image data must not be empty".to_string()));
    }
    if question.trim().is_empty() {
        return Err(VisionError::Validation("question must not be empty".to_string()));
    }

    let payload = ChatCompletionRequest {
        model: MODEL.to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: vec![
                ContentPart::Text {
                    text: question.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("{}{}", DATA_URI_PREFIX, base64_image),
                    },
                },
            ],
        }],
        max_tokens: MAX_TOKENS,
    };

    Ok(AnalysisRequest {
        credential: credential.clone(),
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;
    use serde_json::json;

    fn credential() -> Credential {
        Credential::new("sk-test")
    }

    #[test]
    fn test_encode_known_value() {
        assert_eq!(encode(b"hello").unwrap(), "aGVsbG8=");
    }

    #[test]
    fn test_encode_empty_fails() {
        let err = encode(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_encode_has_no_line_breaks() {
        let big = vec![0xABu8; 4096];
        let encoded = encode(&big).unwrap();
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('\r'));
    }

    proptest! {
        #[test]
        fn prop_encode_round_trips(bytes in proptest::collection::vec(any::<u8>(), 1..2048)) {
            let encoded = encode(&bytes).unwrap();
            let decoded = base64::engine::general_purpose::STANDARD.decode(&encoded).unwrap();
            prop_assert_eq!(decoded, bytes);
        }
    }

    #[tokio::test]
    async fn test_encode_file_missing_is_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_file(dir.path().join("nope.png")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[tokio::test]
    async fn test_read_image_directory_is_encoding_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_image(dir.path()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[tokio::test]
    async fn test_encode_file_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.jpg");
        std::fs::write(&path, b"hello").unwrap();
        assert_eq!(encode_file(&path).await.unwrap(), "aGVsbG8=");
    }

    #[test]
    fn test_build_request_shape() {
        let request = build_request(&credential(), "QUJD", "What is this?").unwrap();
        let payload = request.payload();

        assert_eq!(payload.model, MODEL);
        assert_eq!(payload.max_tokens, 300);
        assert_eq!(payload.messages.len(), 1);

        let message = &payload.messages[0];
        assert_eq!(message.role, "user");
        assert_eq!(message.content.len(), 2);
        assert_eq!(
            message.content[0],
            ContentPart::Text {
                text: "What is this?".to_string()
            }
        );
        assert_eq!(
            message.content[1],
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "data:image/jpeg;base64,QUJD".to_string()
                }
            }
        );
        assert_eq!(request.credential().expose(), "sk-test");
    }

    #[test]
    fn test_build_request_is_deterministic() {
        let a = build_request(&credential(), "QUJD", "q").unwrap();
        let b = build_request(&credential(), "QUJD", "q").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn test_build_request_empty_question() {
        let err = build_request(&credential(), "QUJD", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_build_request_empty_credential() {
        let err = build_request(&Credential::new(""), "QUJD", "q").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_build_request_empty_image() {
        let err = build_request(&credential(), "", "q").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_serialized_body_matches_wire_schema() {
        let image: Vec<u8> = vec![0, 1, 2, 3, 250, 251, 252, 253, 254, 255];
        let encoded = encode(&image).unwrap();
        let request = build_request(&credential(), &encoded, "What is in this image?").unwrap();

        let body: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        let expected = json!({
            "model": MODEL,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "What is in this image?"},
                        {"type": "image_url", "image_url": {"url": format!("data:image/jpeg;base64,{}", encoded)}}
                    ]
                }
            ],
            "max_tokens": 300
        });
        assert_eq!(body, expected);

        // And it deserializes back into the typed payload
        let typed: ChatCompletionRequest = serde_json::from_value(body).unwrap();
        assert_eq!(&typed, request.payload());
    }
}
