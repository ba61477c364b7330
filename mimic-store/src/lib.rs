//! # Mimic Store
//!
//! Named, saved flows: conversion between runnable steps and their
//! storable form, plus CRUD against a simple key-value store.

mod convert;
mod error;
mod flow;
mod kv;
mod repository;


pub use convert::{to_saved_steps, to_sequence_steps};
pub use error::StoreError;
pub use flow::{FlowSummary, SavedDelayStep, SavedFlow, SavedRequestStep, SavedStep};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::{FlowRepository, STORAGE_KEY};

/// Prelude module for persistence
pub mod prelude {
    pub use crate::{
        to_saved_steps, to_sequence_steps, FileStore, FlowRepository,
        KeyValueStore, MemoryStore, SavedFlow, SavedStep, StoreError,
    };
}
