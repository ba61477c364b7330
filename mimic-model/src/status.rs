use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime status of a step.
///
/// `Idle -> Running -> {Success | Error}`. Any status may go back to
/// `Idle` through an explicit reset, and a finished step may start running
/// again when the sequence is run anew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

impl StepStatus {
    /// `Success` and `Error` are terminal until a reset.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Success | StepStatus::Error)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: StepStatus) -> bool {
        match (self, next) {
            (_, StepStatus::Idle) => true,
            (StepStatus::Idle, StepStatus::Running) => true,
            (from, StepStatus::Running) if from.is_terminal() => true,
            (StepStatus::Running, StepStatus::Success | StepStatus::Error) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Idle => "idle",
            StepStatus::Running => "running",
            StepStatus::Success => "success",
            StepStatus::Error => "error",
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
