//! # Mimic Gateway
//!
//! Performs outbound HTTP calls on behalf of a sequence runner and
//! normalizes what comes back, so callers never deal with cross-origin
//! policy or raw transport details.

mod content;
mod error;
mod http;
mod relay;
#[cfg(feature = "server")]
mod server;
mod wire;


pub use content::{
    encode_body, is_json, resolve_content_type, DEFAULT_CONTENT_TYPE,
};
pub use error::GatewayError;
pub use http::{GatewayConfig, HttpGateway};
pub use relay::RelayClient;
#[cfg(feature = "server")]
pub use server::{router, GatewayServer, GatewayState};
pub use wire::{ErrorBody, ProxyPayload, ProxyRequest, RAW_TEXT_FIELD};

use async_trait::async_trait;
use std::sync::Arc;

/// Anything able to carry out a [`ProxyRequest`]
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn execute(
        &self,
        request: &ProxyRequest,
    ) -> Result<ProxyPayload, GatewayError>;
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for Arc<G> {
    async fn execute(
        &self,
        request: &ProxyRequest,
    ) -> Result<ProxyPayload, GatewayError> {
        (**self).execute(request).await
    }
}

/// Prelude module for gateway functionality
pub mod prelude {
    pub use crate::{
        Gateway, GatewayConfig, GatewayError, HttpGateway, ProxyPayload,
        ProxyRequest, RelayClient,
    };
}
