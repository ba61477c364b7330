use crate::wire::ErrorBody;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Failure outcomes of a gateway call
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// Missing or unusable input; no outbound call was attempted.
    #[error("{0}")]
    InvalidRequest(String),

    /// The upstream answered with a non-2xx status.
    #[error("Request failed: {status} {status_text}")]
    Upstream {
        status: u16,
        status_text: String,
        data: Option<Value>,
    },

    /// The call could not be made at all.
    #[error("{0}")]
    Transport(String),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Error body returned by a remote relay.
    #[error("{message}")]
    Relay {
        status: u16,
        message: String,
        data: Option<Value>,
    },
}

impl GatewayError {
    /// HTTP status the relay answers with for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::InvalidRequest(_) => 400,
            GatewayError::Upstream { status, .. } => *status,
            GatewayError::Transport(_) | GatewayError::Timeout(_) => 500,
            GatewayError::Relay { status, .. } => *status,
        }
    }

    /// Body captured alongside the failure, if any.
    pub fn data(&self) -> Option<&Value> {
        match self {
            GatewayError::Upstream { data, .. } | GatewayError::Relay { data, .. } => {
                data.as_ref()
            }
            _ => None,
        }
    }

    pub fn to_wire(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            data: self.data().cloned(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}
