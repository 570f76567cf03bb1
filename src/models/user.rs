use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// User document as stored in the `users` collection.
///
/// Only the fields that get forwarded are kept. Store metadata
/// (`$id`, `_id`, `$createdAt`, ...) is ignored on deserialization.
/// Values stay raw JSON because the store does not enforce a type on
/// `Class` (`"5"` and `5` both occur).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(rename = "phoneNo", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<Value>,
    #[serde(rename = "District", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub district: Option<Value>,
    #[serde(rename = "Class", default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub class: Option<Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent key
/// becomes `None` (via `#[serde(default)]`).
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
