use crate::{DelayStep, InstanceId, ModelError, RequestItem, Step, StepUpdate};
use std::collections::HashSet;

/// Ordered list of steps; order is execution order.
///
/// The sequence is owned by the caller. The runner only reads a snapshot
/// and reports updates, which the owner applies here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    steps: Vec<Step>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence, rejecting duplicate instance ids.
    pub fn from_steps(steps: Vec<Step>) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(steps.len());
        for step in &steps {
            if !seen.insert(step.instance_id().clone()) {
                return Err(ModelError::DuplicateInstance(
                    step.instance_id().clone(),
                ));
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, instance_id: &InstanceId) -> Option<&Step> {
        self.steps
            .iter()
            .find(|step| step.instance_id() == instance_id)
    }

    fn position(&self, instance_id: &InstanceId) -> Option<usize> {
        self.steps
            .iter()
            .position(|step| step.instance_id() == instance_id)
    }

    /// Appends a request step for a catalog item.
    pub fn push_item(&mut self, item: &RequestItem) -> InstanceId {
        let step = Step::request(item);
        let instance_id = step.instance_id().clone();
        tracing::debug!(instance = %instance_id, item = %item.id, "request step added");
        self.steps.push(step);
        instance_id
    }

    pub fn push_delay(&mut self, delay_ms: u64) -> InstanceId {
        let step = Step::Delay(DelayStep::new(delay_ms));
        let instance_id = step.instance_id().clone();
        tracing::debug!(instance = %instance_id, delay_ms, "delay step added");
        self.steps.push(step);
        instance_id
    }

    pub fn remove(&mut self, instance_id: &InstanceId) -> Option<Step> {
        let index = self.position(instance_id)?;
        Some(self.steps.remove(index))
    }

    /// Moves the step at `from` so it ends up at `to`.
    pub fn move_step(&mut self, from: usize, to: usize) -> Result<(), ModelError> {
        let len = self.steps.len();
        if from >= len {
            return Err(ModelError::OutOfBounds { index: from, len });
        }
        if to >= len {
            return Err(ModelError::OutOfBounds { index: to, len });
        }
        let step = self.steps.remove(from);
        self.steps.insert(to, step);
        Ok(())
    }

    pub fn set_delay(
        &mut self,
        instance_id: &InstanceId,
        delay_ms: u64,
    ) -> Result<(), ModelError> {
        match self.steps.iter_mut().find(|s| s.instance_id() == instance_id) {
            Some(Step::Delay(step)) => {
                step.delay_ms = delay_ms;
                Ok(())
            }
            Some(Step::Request(_)) => {
                Err(ModelError::NotADelay(instance_id.clone()))
            }
            None => Err(ModelError::UnknownInstance(instance_id.clone())),
        }
    }

    /// Applies an update to the matching step. Returns `false` when no step
    /// carries that instance id or the status change is not a legal
    /// transition; the step is left as it was.
    pub fn apply(&mut self, instance_id: &InstanceId, update: &StepUpdate) -> bool {
        match self.steps.iter_mut().find(|s| s.instance_id() == instance_id) {
            Some(step) => {
                if let Some(next) = update.status {
                    let current = step.status();
                    if !current.can_transition_to(next) {
                        tracing::warn!(
                            instance = %instance_id,
                            from = %current,
                            to = %next,
                            "illegal status transition ignored"
                        );
                        return false;
                    }
                }
                step.apply(update);
                true
            }
            None => {
                tracing::warn!(instance = %instance_id, "update for unknown step ignored");
                false
            }
        }
    }

    /// True once any step reached `success` or `error`.
    pub fn has_completed_steps(&self) -> bool {
        self.steps.iter().any(|step| step.status().is_terminal())
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
