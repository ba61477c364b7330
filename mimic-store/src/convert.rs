use crate::{SavedDelayStep, SavedRequestStep, SavedStep};
use mimic_model::{DelayStep, InstanceId, RequestStep, Step, StepStatus};

/// Strips runtime state from steps.
pub fn to_saved_steps(steps: &[Step]) -> Vec<SavedStep> {
    steps
        .iter()
        .map(|step| match step {
            Step::Request(step) => SavedStep::Request(SavedRequestStep {
                id: step.id.clone(),
                name: step.name.clone(),
                description: step.description.clone(),
                category: step.category,
                request: step.request.clone(),
            }),
            Step::Delay(step) => SavedStep::Delay(SavedDelayStep {
                delay_ms: step.delay_ms,
            }),
        })
        .collect()
}

/// Rebuilds runnable steps with fresh instance ids, all idle.
pub fn to_sequence_steps(items: &[SavedStep]) -> Vec<Step> {
    items
        .iter()
        .map(|item| match item {
            SavedStep::Request(item) => Step::Request(RequestStep {
                instance_id: InstanceId::generate(&item.id),
                status: StepStatus::Idle,
                id: item.id.clone(),
                name: item.name.clone(),
                description: item.description.clone(),
                category: item.category,
                request: item.request.clone(),
                result: None,
                error: None,
            }),
            SavedStep::Delay(item) => Step::Delay(DelayStep::new(item.delay_ms)),
        })
        .collect()
}
