// Answer extraction from chat completion responses

use super::models::{AnalysisResult, ChatCompletionResponse};
use crate::error::VisionError;

/// Pull `choices[0].message.content` out of a response body.
///
/// Anything else, provider error bodies included, is a
/// [`VisionError::MalformedResponse`]. When the provider supplied
/// `error.message` it is carried along verbatim.
pub fn extract_answer(body: &str) -> AnalysisResult {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| VisionError::MalformedResponse(format!("cannot parse response: {}", e)))?;

    let provider_message = response
        .error
        .as_ref()
        .and_then(|err| err.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string);

    let malformed = |what: &str| {
        let message = match &provider_message {
            Some(detail) => format!("{} (provider said: {})", what, detail),
            None => what.to_string(),
        };
        VisionError::MalformedResponse(message)
    };

    let choices = response
        .choices
        .ok_or_else(|| malformed("response has no choices"))?;

    let first = choices
        .into_iter()
        .next()
        .ok_or_else(|| malformed("response choices are empty"))?;

    match first.message.and_then(|m| m.content) {
        Some(serde_json::Value::String(text)) => Ok(text),
        _ => Err(malformed("first choice has no message content")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn assert_malformed(body: &str) -> String {
        let err = extract_answer(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse, "body: {}", body);
        err.to_string()
    }

    #[test]
    fn test_extracts_first_choice() {
        let answer = extract_answer(r#"{"choices":[{"message":{"content":"hello"}}]}"#).unwrap();
        assert_eq!(answer, "hello");
    }

    #[test]
    fn test_ignores_later_choices() {
        let body = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(extract_answer(body).unwrap(), "first");
    }

    #[test]
    fn test_empty_choices() {
        assert_malformed(r#"{"choices":[]}"#);
    }

    #[test]
    fn test_empty_object() {
        assert_malformed("{}");
    }

    #[test]
    fn test_provider_error_body() {
        let message = assert_malformed(r#"{"error":{"message":"invalid api key"}}"#);
        assert!(message.contains("invalid api key"));
    }

    #[test]
    fn test_unexpected_error_field_does_not_hide_answer() {
        let body = r#"{"choices":[{"message":{"content":"hi"}}],"error":"x"}"#;
        assert_eq!(extract_answer(body).unwrap(), "hi");
    }

    #[test]
    fn test_error_without_message_text() {
        let message = assert_malformed(r#"{"error":{"code":401}}"#);
        assert!(!message.contains("provider said"));
    }

    #[test]
    fn test_missing_content() {
        assert_malformed(r#"{"choices":[{"message":{}}]}"#);
        assert_malformed(r#"{"choices":[{}]}"#);
        assert_malformed(r#"{"choices":[{"message":{"content":null}}]}"#);
    }

    #[test]
    fn test_not_json() {
        assert_malformed("<html>Bad Gateway</html>");
    }
}
