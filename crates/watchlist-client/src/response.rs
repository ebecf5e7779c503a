use serde_json::Value;

use crate::transport::RawResponse;

/// A received HTTP response with its body parsed as JSON when possible
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `None` when the body was empty or not valid JSON
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `error` field, falling back to `message`, when either is a string
    pub fn server_message(&self) -> Option<String> {
        let body = self.body.as_ref()?;
        ["error", "message"]
            .iter()
            .filter_map(|key| body.get(*key).and_then(Value::as_str))
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// `status` string field of the body
    pub fn status_field(&self) -> Option<&str> {
        self.body.as_ref()?.get("status")?.as_str()
    }
}

impl From<RawResponse> for ApiResponse {
    fn from(raw: RawResponse) -> Self {
        let body = if raw.body.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&raw.body).ok()
        };
        Self::new(raw.status, body)
    }
}
