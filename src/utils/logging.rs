//! Structured logging and secret-masking utilities.
//!
//! This module configures the `tracing` ecosystem for the application and
//! provides [`sanitize`] so API keys never end up in log sinks.

use crate::config::LoggingConfig;
use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    static ref API_KEY: Regex = Regex::new(r"sk-[A-Za-z0-9_\-]{4,}").expect("api key pattern");
    static ref BEARER: Regex =
        Regex::new(r"(?i)bearer\s+[A-Za-z0-9_\-\.]+").expect("bearer pattern");
}

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable output for development.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Replaces API keys (`sk-…`) and bearer tokens with placeholders.
pub fn sanitize(input: &str) -> String {
    let result = BEARER.replace_all(input, "Bearer [REDACTED]");
    API_KEY.replace_all(&result, "[REDACTED_API_KEY]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_api_key() {
        let output = sanitize(r#"{"error":{"message":"Incorrect API key provided: sk-abc123XYZ."}}"#);
        assert!(output.contains("[REDACTED_API_KEY]"));
        assert!(!output.contains("sk-abc123XYZ"));
    }

    #[test]
    fn test_sanitize_bearer_header() {
        let output = sanitize("Authorization: Bearer tok_987654");
        assert_eq!(output, "Authorization: Bearer [REDACTED]");
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize("a cat on a sofa"), "a cat on a sofa");
    }
}
