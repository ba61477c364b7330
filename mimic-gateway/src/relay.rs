use crate::wire::ErrorBody;
use crate::{Gateway, GatewayError, ProxyPayload, ProxyRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Gateway that forwards requests to a remote relay's `/api/proxy` endpoint
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl RelayClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(
        base_url: impl AsRef<str>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: format!("{}/api/proxy", base_url.as_ref().trim_end_matches('/')),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Gateway for RelayClient {
    async fn execute(
        &self,
        request: &ProxyRequest,
    ) -> Result<ProxyPayload, GatewayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout(self.timeout.unwrap_or_default())
                } else {
                    GatewayError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            let value = serde_json::from_str(&text).map_err(|e| {
                GatewayError::Transport(format!("invalid relay response: {e}"))
            })?;
            return Ok(ProxyPayload::from_wire(value));
        }

        let err = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => GatewayError::Relay {
                status: status.as_u16(),
                message: body.error,
                data: body.data,
            },
            Err(_) => GatewayError::Relay {
                status: status.as_u16(),
                message: format!("Relay failed: {status}"),
                data: None,
            },
        };
        tracing::warn!(endpoint = %self.endpoint, status = status.as_u16(), error = %err, "relay reported failure");
        Err(err)
    }
}
