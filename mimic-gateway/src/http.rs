use crate::content::{encode_body, is_json, resolve_content_type};
use crate::{Gateway, GatewayError, ProxyPayload, ProxyRequest};
use async_trait::async_trait;
use mimic_model::RequestMethod;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use std::time::{Duration, Instant};

/// Outbound client configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Per-call timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("mimic-gateway/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GatewayConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

/// Gateway issuing the outbound call directly with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new() -> Result<Self, GatewayError> {
        Self::with_config(GatewayConfig::default())
    }

    pub fn with_config(config: GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn map_send_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.config.timeout.unwrap_or_default())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

fn to_method(method: RequestMethod) -> Method {
    match method {
        RequestMethod::Get => Method::GET,
        RequestMethod::Post => Method::POST,
        RequestMethod::Put => Method::PUT,
        RequestMethod::Patch => Method::PATCH,
        RequestMethod::Delete => Method::DELETE,
    }
}

/// JSON bodies are parsed; anything else, or JSON that fails to parse, is
/// kept as raw text.
fn classify(content_type: Option<&str>, text: String) -> ProxyPayload {
    if content_type.is_some_and(is_json) {
        match serde_json::from_str(&text) {
            Ok(value) => return ProxyPayload::Json(value),
            Err(e) => {
                tracing::warn!(error = %e, "JSON response did not parse, keeping raw text");
            }
        }
    }
    ProxyPayload::Text(text)
}

#[async_trait]
impl Gateway for HttpGateway {
    #[tracing::instrument(level = "debug", skip(self, request), fields(url = ?request.url, method = ?request.method))]
    async fn execute(
        &self,
        request: &ProxyRequest,
    ) -> Result<ProxyPayload, GatewayError> {
        let (url, method) = request.target()?;
        let content_type = resolve_content_type(
            request.content_type.as_deref(),
            request.headers.as_ref(),
        );

        let mut builder = self.client.request(to_method(method), url);
        if let Some(headers) = &request.headers {
            for (name, value) in headers {
                if name.eq_ignore_ascii_case("content-type") {
                    continue;
                }
                builder = builder.header(name.as_str(), value.as_str());
            }
        }
        builder = builder.header(CONTENT_TYPE, content_type.as_str());

        if let Some(body) = encode_body(method, &content_type, request.body.as_ref()) {
            builder = builder.body(body);
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            let err = self.map_send_error(e);
            tracing::warn!(%method, url, error = %err, "outbound call failed");
            err
        })?;

        let status = response.status();
        let response_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;
        let payload = classify(response_type.as_deref(), text);

        tracing::info!(
            %method,
            url,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "outbound call completed"
        );

        if !status.is_success() {
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                data: Some(payload.into_data()),
            });
        }

        Ok(payload)
    }
}
