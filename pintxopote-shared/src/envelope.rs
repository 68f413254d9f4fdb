/// Response envelope shared by the API server and the HTTP client
///
/// Every response body is wrapped as either
///
/// ```json
/// { "status": "OK", "data": { "...": "..." } }
/// ```
///
/// or, for failures,
///
/// ```json
/// { "status": "KO", "error": "wrong credentials" }
/// ```
///
/// The `data` field is omitted for operations without a payload
/// (registration and user updates).

use serde::{Deserialize, Serialize};

/// Status marker for successful responses
pub const STATUS_OK: &str = "OK";

/// Status marker for failed responses
pub const STATUS_KO: &str = "KO";

/// JSON envelope wrapping every API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// `"OK"` or `"KO"`
    pub status: String,

    /// Payload of a successful response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error message of a failed response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Successful envelope without payload
    pub fn ok_empty() -> Self {
        Self {
            status: STATUS_OK.to_string(),
            data: None,
            error: None,
        }
    }

    /// Failed envelope carrying an error message
    pub fn ko(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_KO.to_string(),
            data: None,
            error: Some(message.into()),
        }
    }

    /// Whether the embedded status is `"OK"`
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_serialization() {
        let envelope = Envelope::ok(json!({ "id": "abc" }));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({ "status": "OK", "data": { "id": "abc" } }));
    }

    #[test]
    fn test_ok_empty_omits_data() {
        let envelope = Envelope::<()>::ok_empty();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({ "status": "OK" }));
    }

    #[test]
    fn test_ko_serialization() {
        let envelope = Envelope::<()>::ko("wrong credentials");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({ "status": "KO", "error": "wrong credentials" }));
    }

    #[test]
    fn test_bare_ko_status_deserializes() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"status":"KO"}"#).unwrap();
        assert!(!envelope.is_ok());
        assert!(envelope.data.is_none());
        assert!(envelope.error.is_none());
    }
}
