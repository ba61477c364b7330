use crate::{Gateway, GatewayError, ProxyRequest};
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use mimic_model::{Catalog, RequestItem};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Shared state of the relay routes
#[derive(Clone)]
pub struct GatewayState {
    gateway: Arc<dyn Gateway>,
    catalog: Arc<Catalog>,
}

impl GatewayState {
    pub fn new(gateway: Arc<dyn Gateway>, catalog: Catalog) -> Self {
        Self {
            gateway,
            catalog: Arc::new(catalog),
        }
    }
}

/// `POST /api/proxy` and `GET /api/items`
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/api/proxy", post(proxy))
        .route("/api/items", get(list_items))
        .with_state(state)
}

fn error_response(err: &GatewayError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.to_wire())).into_response()
}

async fn proxy(
    State(state): State<GatewayState>,
    payload: Result<Json<ProxyRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let err = GatewayError::InvalidRequest(rejection.body_text());
            return error_response(&err);
        }
    };

    match state.gateway.execute(&request).await {
        Ok(payload) => (StatusCode::OK, Json(payload.into_wire())).into_response(),
        Err(err) => {
            tracing::debug!(status = err.status_code(), error = %err, "proxy call failed");
            error_response(&err)
        }
    }
}

async fn list_items(State(state): State<GatewayState>) -> Json<Vec<RequestItem>> {
    Json(state.catalog.items().to_vec())
}

/// Running relay server
pub struct GatewayServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    local_addr: SocketAddr,
}

impl GatewayServer {
    /// Binds `addr` and serves the relay routes in a background task.
    pub async fn start(addr: SocketAddr, state: GatewayState) -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let app = router(state);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                tracing::error!(error = %e, "gateway server stopped with error");
            }
        });

        tracing::info!(addr = %local_addr, "gateway server listening");

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        tracing::info!(addr = %self.local_addr, "gateway server stopped");
    }
}

impl Drop for GatewayServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
