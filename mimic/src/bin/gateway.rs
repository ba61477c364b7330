use anyhow::{Context, Result};
use mimic::gateway::{GatewayServer, GatewayState, HttpGateway};
use mimic::logger::Logger;
use mimic::model::Catalog;
use mimic::ConfigLoader;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigLoader::from_env()?;
    if config.log.json {
        Logger::init_json_tracing();
    } else {
        Logger::init_tracing();
    }
    let gateway = HttpGateway::with_config(config.gateway_config())
        .context("Failed to build outbound HTTP client")?;
    let state = GatewayState::new(Arc::new(gateway), Catalog::builtin());

    let addr = config.bind_addr()?;
    let server = GatewayServer::start(addr, state)
        .await
        .with_context(|| format!("Failed to bind gateway on {addr}"))?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    server.shutdown().await;
    Ok(())
}
