use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::http::ApiError;

/// Shown when the backend rejects a request without saying why.
pub const REJECTED_FALLBACK: &str = "Request failed";

/// The uniform `{success, message, data}` wrapper around every backend response.
///
/// The backend also emits a `{code, message, data, timestamp}` form where `code == 200`
/// means success. An explicit `success` field takes precedence over `code`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Envelope<T = Value> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(self.code == Some(200))
    }
}

impl Envelope<Value> {
    /// Normalize into a tagged outcome. `data` is only decoded when the envelope reports success.
    pub fn into_outcome<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if !self.is_success() {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
            return Err(ApiError::RequestRejected { message });
        }
        serde_json::from_value(self.data).map_err(|e| ApiError::malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn success_flag_yields_data() {
        let out: i64 = envelope(json!({"success": true, "message": "", "data": 42}))
            .into_outcome()
            .unwrap();
        assert_eq!(out, 42);
    }

    #[test]
    fn code_200_counts_as_success() {
        let env = envelope(json!({"code": 200, "message": "ok", "data": "x", "timestamp": 1}));
        assert!(env.is_success());
        let out: String = env.into_outcome().unwrap();
        assert_eq!(out, "x");
    }

    #[test]
    fn explicit_success_flag_beats_code() {
        let env = envelope(json!({"success": false, "code": 200, "message": "nope"}));
        assert!(!env.is_success());
    }

    #[test]
    fn rejection_carries_server_message() {
        let err = envelope(json!({"success": false, "message": "bad credentials", "data": {"junk": 1}}))
            .into_outcome::<i64>()
            .unwrap_err();
        assert!(matches!(err, ApiError::RequestRejected { ref message } if message == "bad credentials"));
    }

    #[test]
    fn rejection_without_message_uses_fallback() {
        let err = envelope(json!({"code": 500})).into_outcome::<Value>().unwrap_err();
        assert_eq!(err.to_string(), REJECTED_FALLBACK);
    }

    #[test]
    fn success_with_wrong_shape_is_malformed() {
        let err = envelope(json!({"success": true, "data": "not a number"}))
            .into_outcome::<i64>()
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }
}
