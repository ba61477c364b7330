use mimic_model::{find_header, RequestMethod};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Effective content type: explicit field, then `Content-Type` header, then
/// the JSON default.
pub fn resolve_content_type(
    explicit: Option<&str>,
    headers: Option<&BTreeMap<String, String>>,
) -> String {
    if let Some(content_type) = explicit.filter(|c| !c.trim().is_empty()) {
        return content_type.to_string();
    }

    find_header(headers, "content-type")
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

/// Whether a content type denotes a JSON document.
pub fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// Wire body for the outbound call.
///
/// Only POST, PUT and PATCH carry a body. Strings are passed through as
/// already wire-ready; structured values are serialized as JSON text.
pub fn encode_body(
    method: RequestMethod,
    content_type: &str,
    body: Option<&Value>,
) -> Option<String> {
    if !method.carries_body() {
        return None;
    }

    match body? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        value => {
            if !is_json(content_type) {
                tracing::debug!(content_type, "structured body sent as JSON text under non-JSON content type");
            }
            Some(value.to_string())
        }
    }
}
