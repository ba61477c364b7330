use mimic_model::{InstanceId, Sequence, StepUpdate};
use tokio::sync::mpsc::UnboundedSender;

/// Receives the updates a run produces.
///
/// The runner never mutates steps itself; whoever owns them applies the
/// updates.
pub trait UpdateSink {
    fn update(&mut self, instance_id: &InstanceId, update: StepUpdate);
}

impl<F> UpdateSink for F
where
    F: FnMut(&InstanceId, StepUpdate),
{
    fn update(&mut self, instance_id: &InstanceId, update: StepUpdate) {
        self(instance_id, update)
    }
}

impl UpdateSink for Sequence {
    fn update(&mut self, instance_id: &InstanceId, update: StepUpdate) {
        self.apply(instance_id, &update);
    }
}

/// One update as sent over a channel
#[derive(Debug, Clone, PartialEq)]
pub struct StepEvent {
    pub instance_id: InstanceId,
    pub update: StepUpdate,
}

impl UpdateSink for UnboundedSender<StepEvent> {
    fn update(&mut self, instance_id: &InstanceId, update: StepUpdate) {
        let event = StepEvent {
            instance_id: instance_id.clone(),
            update,
        };
        if self.send(event).is_err() {
            tracing::debug!(instance = %instance_id, "update receiver dropped");
        }
    }
}
