use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One execution as handed over by the hosting runtime.
#[derive(Debug, Clone, Default)]
pub struct ForwardRequest {
    pub body: Option<String>,
    /// Header names are stored lowercased; repeated headers keep every value
    headers: HashMap<String, Vec<String>>,
}

impl ForwardRequest {
    pub fn new(body: Option<String>) -> Self {
        Self {
            body,
            headers: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.to_string());
        self
    }

    /// First value of the header, if any
    pub fn header(&self, name: &str) -> Option<&str> {
        self.header_values(name).first().map(String::as_str)
    }

    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Extracts a non-empty `userId` string from the body.
    ///
    /// A missing, blank or malformed body counts as `{}`.
    pub fn user_id(&self) -> Option<String> {
        let raw = self.body.as_deref().unwrap_or("").trim();
        let raw = if raw.is_empty() { "{}" } else { raw };

        let parsed: Value = serde_json::from_str(raw).unwrap_or(Value::Null);

        parsed
            .get("userId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}

/// Body POSTed to the webhook.
///
/// Fields that are absent on the record are left out entirely.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
pub struct ForwardPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Value>,
    #[serde(rename = "phoneNo", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub phone_no: Option<Value>,
    #[serde(rename = "District", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub district: Option<Value>,
    #[serde(rename = "Class", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub class: Option<Value>,
}

/// Result of one execution, always rendered as a 200 JSON body.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ForwardResponse {
    Success {
        success: bool,
        #[serde(rename = "userId")]
        user_id: String,
    },
    Failure {
        error: String,
    },
}

impl ForwardResponse {
    pub fn success(user_id: impl Into<String>) -> Self {
        ForwardResponse::Success {
            success: true,
            user_id: user_id.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ForwardResponse::Failure {
            error: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ForwardResponse::Success { .. })
    }
}
