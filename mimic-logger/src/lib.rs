//! # Mimic Logger
//!
//! Logging and tracing support for Mimic sequence runs

use mimic_core::RunSummary;
use mimic_model::{Sequence, Step, StepStatus};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Logger tagging every line with a run trace id
pub struct Logger {
    pub trace_id: String,
}

impl Logger {
    /// Create a new logger
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with a specific trace ID
    pub fn with_trace_id(trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
        }
    }

    /// Initialize the tracing subscriber from `RUST_LOG`, defaulting to `info`
    pub fn init_tracing() {
        if Self::try_init_tracing().is_err() {
            debug!("tracing subscriber already installed");
        }
    }

    /// Like [`init_tracing`](Self::init_tracing), reporting whether a
    /// global subscriber was already set
    pub fn try_init_tracing() -> Result<(), String> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| e.to_string())
    }

    /// JSON lines output, for log shipping
    pub fn init_json_tracing() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"));
        if tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
            .is_err()
        {
            debug!("tracing subscriber already installed");
        }
    }

    /// Log the outcome counts of a run
    pub fn log_run_summary(&self, summary: &RunSummary) {
        info!(
            trace_id = %self.trace_id,
            total_steps = summary.total,
            success = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            cancelled = summary.cancelled,
            duration_ms = summary.duration.as_millis() as u64,
            "Sequence run summary"
        );
    }

    /// Log every step of a sequence with its current status
    pub fn log_sequence_details(&self, sequence: &Sequence) {
        for (position, step) in sequence.steps().iter().enumerate() {
            match step {
                Step::Request(request) => match request.status {
                    StepStatus::Error => {
                        error!(
                            trace_id = %self.trace_id,
                            position,
                            instance = %request.instance_id,
                            step_name = %request.name,
                            error = %request.error.as_deref().unwrap_or("Unknown error"),
                            "Request step failed"
                        );
                    }
                    StepStatus::Running => {
                        warn!(
                            trace_id = %self.trace_id,
                            position,
                            instance = %request.instance_id,
                            step_name = %request.name,
                            "Request step still running"
                        );
                    }
                    status => {
                        info!(
                            trace_id = %self.trace_id,
                            position,
                            instance = %request.instance_id,
                            step_name = %request.name,
                            method = %request.request.method,
                            url = %request.request.url,
                            %status,
                            "Request step"
                        );
                    }
                },
                Step::Delay(delay) => {
                    info!(
                        trace_id = %self.trace_id,
                        position,
                        instance = %delay.instance_id,
                        delay_ms = delay.delay_ms,
                        status = %delay.status,
                        "Delay step"
                    );
                }
            }
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
