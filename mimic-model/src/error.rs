use crate::InstanceId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate instance id '{0}' in sequence")]
    DuplicateInstance(InstanceId),

    #[error("step '{0}' not found in sequence")]
    UnknownInstance(InstanceId),

    #[error("step '{0}' is not a delay step")]
    NotADelay(InstanceId),

    #[error("position {index} out of bounds for sequence of {len} steps")]
    OutOfBounds { index: usize, len: usize },

    #[error("unsupported request method '{0}'")]
    UnsupportedMethod(String),
}
