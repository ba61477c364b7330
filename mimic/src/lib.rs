//! # Mimic - Request Sequence Runner
//!
//! Mimic assembles ordered sequences of HTTP requests and fixed delays,
//! runs them one step at a time while reporting every status change, and
//! saves named sequences for reuse.
//!
//! ## Features
//!
//! - `store` (default): saved flows and the [`Workbench`]
//! - `logger` (default): tracing setup and run summaries
//! - `server` (default): the HTTP relay exposing `/api/proxy`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mimic::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let catalog = Catalog::builtin();
//!     let mut sequence = Sequence::new();
//!     sequence.push_item(catalog.get("api-1").unwrap());
//!     sequence.push_delay(500);
//!     sequence.push_item(catalog.get("pay-2").unwrap());
//!
//!     let runner = SequenceRunner::new(Arc::new(HttpGateway::new()?));
//!     let summary = runner.run_in_place(&mut sequence).await;
//!     println!("{} ok, {} failed", summary.succeeded, summary.failed);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
#[cfg(feature = "store")]
mod workbench;

pub use config::{
    ConfigLoader, GatewaySection, LogSection, MimicConfig, RunnerSection,
    StoreSection, CONFIG_ENV,
};
#[cfg(feature = "store")]
#[cfg_attr(docsrs, doc(cfg(feature = "store")))]
pub use workbench::{Workbench, DEFAULT_DELAY_MS};

pub use mimic_core as core;
pub use mimic_gateway as gateway;
pub use mimic_model as model;

#[cfg(feature = "store")]
#[cfg_attr(docsrs, doc(cfg(feature = "store")))]
pub use mimic_store as store;

#[cfg(feature = "logger")]
#[cfg_attr(docsrs, doc(cfg(feature = "logger")))]
pub use mimic_logger as logger;

/// Prelude module for easy imports
pub mod prelude {
    pub use crate::{ConfigLoader, MimicConfig};
    pub use mimic_core::prelude::*;
    pub use mimic_gateway::prelude::*;
    pub use mimic_model::prelude::*;

    #[cfg(feature = "store")]
    #[cfg_attr(docsrs, doc(cfg(feature = "store")))]
    pub use crate::Workbench;
    #[cfg(feature = "store")]
    #[cfg_attr(docsrs, doc(cfg(feature = "store")))]
    pub use mimic_store::prelude::*;

    #[cfg(feature = "logger")]
    #[cfg_attr(docsrs, doc(cfg(feature = "logger")))]
    pub use mimic_logger::Logger;
}
