//! # Mimic Core
//!
//! Runs a sequence of steps one at a time, reporting every status change
//! through an update sink owned by the caller.

mod cancel;
mod config;
mod runner;
mod sink;


pub use cancel::CancelToken;
pub use config::{FailurePolicy, RunnerConfig};
pub use runner::{RunSummary, SequenceRunner};
pub use sink::{StepEvent, UpdateSink};

/// Prelude module for core functionality
pub mod prelude {
    pub use crate::{
        CancelToken, FailurePolicy, RunSummary, RunnerConfig, SequenceRunner,
        StepEvent, UpdateSink,
    };
    pub use mimic_model::{InstanceId, Sequence, Step, StepStatus, StepUpdate};
}
