use serde_json::{json, Value};
use thiserror::Error;

/// Status assigned to failures for which no HTTP response was obtained (transport errors,
/// unparseable bodies on a success status).
pub const NO_RESPONSE_STATUS: u16 = 500;

/// The single error shape surfaced by the storefront client.
///
/// Every failure mode -- transport error, non-success status with or without a JSON error
/// payload, or a malformed body on a success status -- is normalized into a status code and a
/// JSON payload that always carries at least a `message` field. The display message is the
/// payload's `message` when the server provided one, and `HTTP error <status>` otherwise.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    status: u16,
    data: Value,
    message: String,
}

impl ApiError {
    pub fn new(status: u16, data: Value) -> Self {
        let message = match data["message"].as_str() {
            Some(m) => m.to_string(),
            None => format!("HTTP error {status}"),
        };
        Self { status, data, message }
    }

    pub fn from_message<S: Into<String>>(status: u16, message: S) -> Self {
        let message = message.into();
        let data = json!({ "message": message });
        Self { status, data, message }
    }

    /// Normalizes an error that never carried a status or server payload.
    pub fn no_response<S: Into<String>>(message: S) -> Self {
        Self::from_message(NO_RESPONSE_STATUS, message)
    }

    /// Builds the error for a non-success response. The body is parsed as JSON to obtain the
    /// server's error payload; unparseable bodies fall back to `{message: <status text>}`.
    pub fn from_error_body(status: u16, status_text: &str, body: &str) -> Self {
        let data = serde_json::from_str::<Value>(body).unwrap_or_else(|_| json!({ "message": status_text }));
        Self::new(status, data)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_is_taken_from_the_payload() {
        let err = ApiError::new(404, json!({"message": "Product not found"}));
        assert_eq!(err.status(), 404);
        assert_eq!(err.message(), "Product not found");
        assert_eq!(err.to_string(), "Product not found");
    }

    #[test]
    fn message_is_generated_when_the_payload_has_none() {
        let err = ApiError::new(422, json!({"detail": "sku must be unique"}));
        assert_eq!(err.message(), "HTTP error 422");
        assert_eq!(err.data()["detail"], "sku must be unique");
    }

    #[test]
    fn error_body_with_json_payload_is_kept() {
        let err = ApiError::from_error_body(400, "Bad Request", r#"{"message":"Invalid price","field":"price"}"#);
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "Invalid price");
        assert_eq!(err.data()["field"], "price");
    }

    #[test]
    fn unparseable_error_body_falls_back_to_status_text() {
        let err = ApiError::from_error_body(503, "Service Unavailable", "<html>gateway timeout</html>");
        assert_eq!(err.status(), 503);
        assert_eq!(err.data(), &json!({"message": "Service Unavailable"}));
        assert_eq!(err.message(), "Service Unavailable");
    }

    #[test]
    fn non_object_error_body_still_gets_a_message() {
        // "42" is valid JSON but carries no message field.
        let err = ApiError::from_error_body(500, "Internal Server Error", "42");
        assert_eq!(err.message(), "HTTP error 500");
        assert_eq!(err.data(), &json!(42));
    }

    #[test]
    fn transport_failures_are_assigned_status_500() {
        let err = ApiError::no_response("connection refused");
        assert_eq!(err.status(), NO_RESPONSE_STATUS);
        assert_eq!(err.data(), &json!({"message": "connection refused"}));
        assert_eq!(err.message(), "connection refused");
    }
}
