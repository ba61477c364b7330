use crate::{RequestCategory, RequestItem, RequestSpec, StepStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Identity of a step inside one in-memory sequence.
///
/// Distinct from the catalog `id`: the same catalog item added twice gets
/// two instance ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Mints `<prefix>-<uuid>`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstanceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for InstanceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Request,
    Delay,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Request => f.write_str("request"),
            StepKind::Delay => f.write_str("delay"),
        }
    }
}

/// A request to issue, with its last outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStep {
    pub instance_id: InstanceId,
    #[serde(default)]
    pub status: StepStatus,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: RequestCategory,
    pub request: RequestSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RequestStep {
    /// Builds an idle step from a catalog item with a fresh instance id.
    pub fn from_item(item: &RequestItem) -> Self {
        Self {
            instance_id: InstanceId::generate(&item.id),
            status: StepStatus::Idle,
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category,
            request: item.request.clone(),
            result: None,
            error: None,
        }
    }
}

/// A fixed wait; it cannot fail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelayStep {
    pub instance_id: InstanceId,
    #[serde(default)]
    pub status: StepStatus,
    pub delay_ms: u64,
}

impl DelayStep {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            instance_id: InstanceId::generate("delay"),
            status: StepStatus::Idle,
            delay_ms,
        }
    }

    /// Negative input becomes a zero-length delay.
    pub fn clamped(delay_ms: i64) -> Self {
        Self::new(delay_ms.max(0) as u64)
    }
}

/// One unit of a sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Request(RequestStep),
    Delay(DelayStep),
}

impl Step {
    pub fn request(item: &RequestItem) -> Self {
        Step::Request(RequestStep::from_item(item))
    }

    pub fn delay(delay_ms: u64) -> Self {
        Step::Delay(DelayStep::new(delay_ms))
    }

    pub fn instance_id(&self) -> &InstanceId {
        match self {
            Step::Request(step) => &step.instance_id,
            Step::Delay(step) => &step.instance_id,
        }
    }

    pub fn status(&self) -> StepStatus {
        match self {
            Step::Request(step) => step.status,
            Step::Delay(step) => step.status,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Step::Request(_) => StepKind::Request,
            Step::Delay(_) => StepKind::Delay,
        }
    }

    /// Human readable label used in logs.
    pub fn label(&self) -> String {
        match self {
            Step::Request(step) => step.name.clone(),
            Step::Delay(step) => format!("delay {}ms", step.delay_ms),
        }
    }

    /// Applies a partial update.
    ///
    /// Status is replaced when present. For request steps `result` and
    /// `error` always take the update's values, so an update without them
    /// clears the previous outcome. Delay steps only carry a status.
    pub fn apply(&mut self, update: &StepUpdate) {
        match self {
            Step::Request(step) => {
                if let Some(status) = update.status {
                    step.status = status;
                }
                step.result = update.result.clone();
                step.error = update.error.clone();
            }
            Step::Delay(step) => {
                if let Some(status) = update.status {
                    step.status = status;
                }
            }
        }
    }
}

/// Partial update emitted by the runner for one step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<StepStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepUpdate {
    pub fn status(status: StepStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn running() -> Self {
        Self::status(StepStatus::Running)
    }

    pub fn idle() -> Self {
        Self::status(StepStatus::Idle)
    }

    /// Success with a payload; the error is cleared.
    pub fn succeeded(result: Value) -> Self {
        Self {
            status: Some(StepStatus::Success),
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Some(StepStatus::Error),
            result: None,
            error: Some(message.into()),
        }
    }
}
