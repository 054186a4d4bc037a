// Error handling tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use vision_ask::error::{ErrorKind, VisionError};

#[test]
fn test_error_display_messages() {
    let errors = vec![
        VisionError::Validation("question must not be empty".to_string()),
        VisionError::Encoding("image is empty".to_string()),
        VisionError::Network("connection refused".to_string()),
        VisionError::MalformedResponse("response has no choices".to_string()),
        VisionError::MissingCredential("OPENAI_API_KEY".to_string()),
        VisionError::Config("bad port".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
        assert!(!display.contains('\n'), "Error should fit on one line");
    }
}

#[test]
fn test_missing_credential_names_variable() {
    let error = VisionError::MissingCredential("OPENAI_API_KEY".to_string());
    let message = error.to_string();
    assert!(message.contains("API key not found"));
    assert!(message.contains("OPENAI_API_KEY"));
}

#[test]
fn test_error_kinds() {
    assert_eq!(VisionError::Validation(String::new()).kind(), ErrorKind::Validation);
    assert_eq!(VisionError::Encoding(String::new()).kind(), ErrorKind::Encoding);
    assert_eq!(VisionError::Network(String::new()).kind(), ErrorKind::Network);
    assert_eq!(
        VisionError::MalformedResponse(String::new()).kind(),
        ErrorKind::MalformedResponse
    );
    assert_eq!(
        VisionError::MissingCredential(String::new()).kind(),
        ErrorKind::MissingCredential
    );
    assert_eq!(VisionError::Internal(String::new()).kind(), ErrorKind::Internal);
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: VisionError = io.into();
    assert_eq!(error.kind(), ErrorKind::Internal);
    assert!(error.to_string().contains("denied"));
}

#[test]
fn test_http_status_mapping() {
    let cases = [
        (VisionError::Validation("x".into()), StatusCode::BAD_REQUEST),
        (VisionError::Encoding("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
        (VisionError::Network("x".into()), StatusCode::BAD_GATEWAY),
        (VisionError::MalformedResponse("x".into()), StatusCode::BAD_GATEWAY),
        (VisionError::MissingCredential("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        (VisionError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error, expected) in cases {
        assert_eq!(error.into_response().status(), expected);
    }
}

#[tokio::test]
async fn test_error_response_body() {
    let response = VisionError::MalformedResponse("response has no choices".into()).into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["type"], "error");
    assert_eq!(json["error"]["type"], "malformed_response_error");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("response has no choices"));
}
