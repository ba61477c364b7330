use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the runner does after a request step fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep going; every remaining step still runs.
    #[default]
    Continue,
    /// Leave the remaining steps untouched.
    StopOnFirstFailure,
}

/// Runner configuration
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    pub failure_policy: FailurePolicy,
    /// Upper bound on a single request step
    pub request_timeout: Option<Duration>,
}

impl RunnerConfig {
    pub fn stop_on_first_failure(mut self) -> Self {
        self.failure_policy = FailurePolicy::StopOnFirstFailure;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
