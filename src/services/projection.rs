use serde_json::Value;

use crate::models::{ForwardPayload, UserRecord};

/// Field mapping applied to a fetched record before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `email`, `phoneNo`, `District`, `Class` copied as-is
    Plain,
    /// Adds `name` and renders `Class` as `"Class <n>"`
    Labeled,
}

impl PayloadShape {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" => Some(PayloadShape::Plain),
            "labeled" | "labelled" => Some(PayloadShape::Labeled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadShape::Plain => "plain",
            PayloadShape::Labeled => "labeled",
        }
    }

    pub fn project(&self, record: &UserRecord) -> ForwardPayload {
        match self {
            PayloadShape::Plain => ForwardPayload {
                name: None,
                email: record.email.clone(),
                phone_no: record.phone_no.clone(),
                district: record.district.clone(),
                class: record.class.clone(),
            },
            PayloadShape::Labeled => ForwardPayload {
                name: record.name.clone(),
                email: record.email.clone(),
                phone_no: record.phone_no.clone(),
                district: record.district.clone(),
                class: record.class.as_ref().and_then(class_label),
            },
        }
    }
}

/// `"5"` and `5` both become `"Class 5"`; null stays out of the payload.
fn class_label(class: &Value) -> Option<Value> {
    let text = match class {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Some(Value::String(format!("Class {}", text)))
}
