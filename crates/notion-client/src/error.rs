//! # Client Error Types
//!
//! Error taxonomy for Notion client operations: argument validation, network
//! transport, non-2xx remote responses and response decoding.

use thiserror::Error;

/// Client operation result type
pub type NotionResult<T> = Result<T, NotionError>;

/// Error types for Notion client operations
#[derive(Debug, Error)]
pub enum NotionError {
    /// A required argument is missing or malformed. Raised before any request is sent.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Connection refused, DNS failure, timeout and similar network-level failures.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service answered with a non-2xx status.
    #[error("Notion API error: {status} - {body}")]
    Remote { status: u16, body: String },

    /// The response JSON is missing a required field or violates a variant invariant.
    #[error("Invalid response: {field} - {reason}")]
    Decode { field: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization/deserialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NotionError {
    /// Create a remote error from an HTTP response
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::Remote {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error for a response that breaks the document model
    pub fn decode(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status of a remote error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            NotionError::Remote { status, .. } => Some(*status),
            NotionError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The request body or block structure was rejected (HTTP 400).
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    /// The identifier is unknown, archived, or not shared with the integration (HTTP 404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Short machine-readable code used in tool error payloads.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            NotionError::Validation(_) => "validation_error",
            NotionError::Transport(_) => "transport_error",
            NotionError::Remote { .. } => "remote_error",
            NotionError::Decode { .. } => "decode_error",
            NotionError::Config(_) => "config_error",
            NotionError::Serialization(_) => "serialization_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Constructor tests ----

    #[test]
    fn test_remote_constructor() {
        let err = NotionError::remote(404, "{\"code\":\"object_not_found\"}");
        match err {
            NotionError::Remote { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "{\"code\":\"object_not_found\"}");
            }
            _ => panic!("Expected Remote variant"),
        }
    }

    #[test]
    fn test_decode_constructor() {
        let err = NotionError::decode("properties.Name.type", "missing field");
        match err {
            NotionError::Decode { field, reason } => {
                assert_eq!(field, "properties.Name.type");
                assert_eq!(reason, "missing field");
            }
            _ => panic!("Expected Decode variant"),
        }
    }

    #[test]
    fn test_validation_constructor() {
        let err = NotionError::validation("page_id is required");
        assert!(matches!(err, NotionError::Validation(ref m) if m == "page_id is required"));
    }

    // ---- Classification ----

    #[test]
    fn test_status_of_remote_error() {
        assert_eq!(NotionError::remote(400, "bad").status(), Some(400));
        assert!(NotionError::remote(400, "bad").is_bad_request());
        assert!(NotionError::remote(404, "gone").is_not_found());
        assert!(!NotionError::remote(500, "boom").is_not_found());
    }

    #[test]
    fn test_non_remote_errors_have_no_status() {
        assert_eq!(NotionError::validation("x").status(), None);
        assert_eq!(NotionError::decode("id", "missing").status(), None);
        assert_eq!(NotionError::config("no key").status(), None);
    }

    #[test]
    fn test_codes() {
        assert_eq!(NotionError::validation("x").code(), "validation_error");
        assert_eq!(NotionError::remote(500, "x").code(), "remote_error");
        assert_eq!(NotionError::decode("a", "b").code(), "decode_error");
        assert_eq!(NotionError::config("c").code(), "config_error");
    }

    // ---- Display tests ----

    #[test]
    fn test_display_remote() {
        let err = NotionError::remote(503, "service down");
        assert_eq!(format!("{err}"), "Notion API error: 503 - service down");
    }

    #[test]
    fn test_display_decode() {
        let err = NotionError::decode("type", "unsupported kind: rollup");
        assert_eq!(
            format!("{err}"),
            "Invalid response: type - unsupported kind: rollup"
        );
    }

    #[test]
    fn test_display_validation() {
        let err = NotionError::validation("block_id is required");
        assert_eq!(format!("{err}"), "Invalid input: block_id is required");
    }

    #[test]
    fn test_display_config() {
        let err = NotionError::config("NOTION_API_KEY not set");
        assert_eq!(format!("{err}"), "Configuration error: NOTION_API_KEY not set");
    }

    // ---- From impls ----

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad}}").unwrap_err();
        let err: NotionError = json_err.into();
        assert!(matches!(err, NotionError::Serialization(_)));
        assert_eq!(err.code(), "serialization_error");
    }

    #[test]
    fn test_debug_impl() {
        let err = NotionError::remote(500, "boom");
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("Remote"));
    }
}
