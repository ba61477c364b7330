use mimic_model::{RequestCategory, RequestSpec};
use serde::{Deserialize, Serialize};

/// Request step without runtime state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRequestStep {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: RequestCategory,
    pub request: RequestSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDelayStep {
    pub delay_ms: u64,
}

/// Storable step: same variants as a runtime step, minus instance id,
/// status, result and error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SavedStep {
    Request(SavedRequestStep),
    Delay(SavedDelayStep),
}

/// A named, persisted sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFlow {
    pub id: String,
    pub name: String,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds
    pub updated_at: i64,
    pub items: Vec<SavedStep>,
}

/// Step counts shown next to a saved flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowSummary {
    pub requests: usize,
    pub delays: usize,
}

impl FlowSummary {
    pub fn of(flow: &SavedFlow) -> Self {
        let delays = flow
            .items
            .iter()
            .filter(|item| matches!(item, SavedStep::Delay(_)))
            .count();
        Self {
            requests: flow.items.len() - delays,
            delays,
        }
    }
}
