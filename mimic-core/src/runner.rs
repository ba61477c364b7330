use crate::{CancelToken, FailurePolicy, RunnerConfig, UpdateSink};
use mimic_gateway::{Gateway, GatewayError, ProxyRequest};
use mimic_model::{DelayStep, RequestStep, Sequence, Step, StepStatus, StepUpdate};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome counts of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Steps that never started (cancelled or stopped after a failure)
    pub skipped: usize,
    pub cancelled: bool,
    pub duration: Duration,
}

impl RunSummary {
    fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// True when every step ran and none failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.skipped == 0 && !self.cancelled
    }
}

/// Clears the busy flag when the run ends, however it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives steps strictly in order, one at a time
pub struct SequenceRunner {
    gateway: Arc<dyn Gateway>,
    config: RunnerConfig,
    busy: AtomicBool,
}

impl SequenceRunner {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self::with_config(gateway, RunnerConfig::default())
    }

    pub fn with_config(gateway: Arc<dyn Gateway>, config: RunnerConfig) -> Self {
        Self {
            gateway,
            config,
            busy: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Busy indicator, true only while a non-empty run is in progress.
    pub fn is_running(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Runs every step, reporting updates to `sink`.
    pub async fn run<S>(&self, steps: &[Step], sink: &mut S) -> RunSummary
    where
        S: UpdateSink + ?Sized,
    {
        self.run_with_cancel(steps, sink, &CancelToken::new()).await
    }

    /// Like [`run`](Self::run), checking `cancel` before each step.
    #[tracing::instrument(level = "info", skip_all, fields(steps = steps.len()))]
    pub async fn run_with_cancel<S>(
        &self,
        steps: &[Step],
        sink: &mut S,
        cancel: &CancelToken,
    ) -> RunSummary
    where
        S: UpdateSink + ?Sized,
    {
        let mut summary = RunSummary::new(steps.len());
        if steps.is_empty() {
            return summary;
        }

        let _busy = BusyGuard::acquire(&self.busy);
        let start = Instant::now();
        tracing::info!(policy = ?self.config.failure_policy, "sequence run starting");

        for (index, step) in steps.iter().enumerate() {
            if cancel.is_cancelled() {
                summary.cancelled = true;
                summary.skipped = steps.len() - index;
                tracing::warn!(remaining = summary.skipped, "sequence run cancelled");
                break;
            }

            let instance_id = step.instance_id();
            tracing::info!(instance = %instance_id, kind = %step.kind(), step = %step.label(), "step starting");
            sink.update(instance_id, StepUpdate::running());

            let step_start = Instant::now();
            let outcome = match step {
                Step::Delay(delay) => self.run_delay(delay).await,
                Step::Request(request) => self.run_request(request).await,
            };
            let duration_ms = step_start.elapsed().as_millis() as u64;

            let failed = outcome.status == Some(StepStatus::Error);
            if failed {
                summary.failed += 1;
                tracing::warn!(
                    instance = %instance_id,
                    duration_ms,
                    error = outcome.error.as_deref().unwrap_or("unknown error"),
                    "step failed"
                );
            } else {
                summary.succeeded += 1;
                tracing::info!(instance = %instance_id, duration_ms, "step success");
            }
            sink.update(instance_id, outcome);

            if failed && self.config.failure_policy == FailurePolicy::StopOnFirstFailure {
                summary.skipped = steps.len() - index - 1;
                tracing::warn!(remaining = summary.skipped, "stopping after first failure");
                break;
            }
        }

        summary.duration = start.elapsed();
        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            duration_ms = summary.duration.as_millis() as u64,
            "sequence run finished"
        );
        summary
    }

    /// Runs a snapshot of `sequence`, applying every update back to it.
    pub async fn run_in_place(&self, sequence: &mut Sequence) -> RunSummary {
        let snapshot = sequence.steps().to_vec();
        self.run(&snapshot, sequence).await
    }

    /// Emits `idle` for every step.
    pub fn reset<S>(&self, steps: &[Step], sink: &mut S)
    where
        S: UpdateSink + ?Sized,
    {
        for step in steps {
            sink.update(step.instance_id(), StepUpdate::idle());
        }
        tracing::debug!(steps = steps.len(), "sequence reset");
    }

    async fn run_delay(&self, step: &DelayStep) -> StepUpdate {
        tokio::time::sleep(Duration::from_millis(step.delay_ms)).await;
        StepUpdate::status(StepStatus::Success)
    }

    async fn run_request(&self, step: &RequestStep) -> StepUpdate {
        let request = ProxyRequest::from(&step.request);
        let call = self.gateway.execute(&request);

        let result = match self.config.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(GatewayError::Timeout(limit)),
            },
            None => call.await,
        };

        match result {
            Ok(payload) => StepUpdate::succeeded(payload.into_wire()),
            Err(err) => StepUpdate::failed(err.to_string()),
        }
    }
}
