// Wire types shared by the HTTP and WebSocket handlers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payload sent by the htmx WebSocket extension on form submit
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "HEADERS", default)]
    pub headers: HashMap<String, serde_json::Value>,
}

// Error body for failed API calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_deserialization() {
        let json = r#"{"message":"Hello, HAL","HEADERS":{"HX-Request":"true","HX-Trigger":null}}"#;
        let message: ChatMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.message.as_deref(), Some("Hello, HAL"));
        assert_eq!(message.headers["HX-Request"], "true");
        assert!(message.headers["HX-Trigger"].is_null());
    }

    #[test]
    fn test_chat_message_without_fields() {
        let message: ChatMessage = serde_json::from_str("{}").unwrap();
        assert!(message.message.is_none());
        assert!(message.headers.is_empty());
    }

    #[test]
    fn test_chat_message_null_message() {
        let message: ChatMessage = serde_json::from_str(r#"{"message":null}"#).unwrap();
        assert!(message.message.is_none());
    }

    #[test]
    fn test_error_response_serialization() {
        let body = ErrorResponse::new("model unavailable");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["error"], "model unavailable");
    }
}
