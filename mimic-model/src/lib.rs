//! # Mimic Model
//!
//! Steps, their runtime status and the caller-owned sequence they live in.

mod catalog;
mod error;
mod request;
mod sequence;
mod status;
mod step;


pub use catalog::Catalog;
pub use error::ModelError;
pub use request::{
    find_header, RequestCategory, RequestItem, RequestMethod, RequestSpec,
};
pub use sequence::Sequence;
pub use status::StepStatus;
pub use step::{DelayStep, InstanceId, RequestStep, Step, StepKind, StepUpdate};

/// Prelude module for model types
pub mod prelude {
    pub use crate::{
        Catalog, DelayStep, InstanceId, RequestCategory, RequestItem,
        RequestMethod, RequestSpec, RequestStep, Sequence, Step, StepStatus,
        StepUpdate,
    };
}
