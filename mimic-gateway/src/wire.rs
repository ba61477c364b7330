use crate::GatewayError;
use mimic_model::{RequestMethod, RequestSpec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Marker field wrapping non-JSON upstream bodies.
pub const RAW_TEXT_FIELD: &str = "_rawText";

/// Request body accepted by the relay.
///
/// `url` and `method` are optional on the wire so that their absence is
/// reported as an input error instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ProxyRequest {
    /// Validated target of the call.
    pub fn target(&self) -> Result<(&str, RequestMethod), GatewayError> {
        let url = self.url.as_deref().filter(|url| !url.trim().is_empty());
        let method = self
            .method
            .as_deref()
            .filter(|method| !method.trim().is_empty());

        match (url, method) {
            (Some(url), Some(method)) => {
                let method = method
                    .parse::<RequestMethod>()
                    .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
                Ok((url, method))
            }
            _ => Err(GatewayError::InvalidRequest(
                "Missing url or method".to_string(),
            )),
        }
    }
}

impl From<&RequestSpec> for ProxyRequest {
    fn from(spec: &RequestSpec) -> Self {
        Self {
            url: Some(spec.url.clone()),
            method: Some(spec.method.as_str().to_string()),
            headers: spec.headers.clone(),
            body: spec.body.clone(),
            content_type: spec.content_type.clone(),
        }
    }
}

/// Normalized upstream body
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyPayload {
    /// Body parsed from a JSON response.
    Json(Value),
    /// Raw text of any other response.
    Text(String),
}

impl ProxyPayload {
    /// Shape sent over the relay: JSON as-is, text as `{"_rawText": ...}`.
    pub fn into_wire(self) -> Value {
        match self {
            ProxyPayload::Json(value) => value,
            ProxyPayload::Text(text) => {
                let mut envelope = Map::new();
                envelope.insert(RAW_TEXT_FIELD.to_string(), Value::String(text));
                Value::Object(envelope)
            }
        }
    }

    pub fn from_wire(value: Value) -> Self {
        if let Value::Object(map) = &value {
            if map.len() == 1 {
                if let Some(Value::String(text)) = map.get(RAW_TEXT_FIELD) {
                    return ProxyPayload::Text(text.clone());
                }
            }
        }
        ProxyPayload::Json(value)
    }

    /// Value recorded as error data: JSON as-is, text as a plain string.
    pub fn into_data(self) -> Value {
        match self {
            ProxyPayload::Json(value) => value,
            ProxyPayload::Text(text) => Value::String(text),
        }
    }
}

/// Error body returned by the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}
