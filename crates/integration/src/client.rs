//! REST client for the integration platform.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use ledgerlink_core::gateway::{AccountingGateway, ActionRun, Connection, GatewayError};
use ledgerlink_shared::Tenant;
use ledgerlink_shared::config::IntegrationConfig;

use crate::token::CustomerTokenIssuer;

const MAX_LOG_BODY_CHARS: usize = 512;

#[derive(Debug, Deserialize)]
struct ConnectionsResponse {
    #[serde(default)]
    items: Vec<Connection>,
}

/// Integration platform client.
#[derive(Debug, Clone)]
pub struct IntegrationClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: CustomerTokenIssuer,
}

impl IntegrationClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_uri` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(config: &IntegrationConfig) -> Result<Self, GatewayError> {
        let base_url = Url::parse(config.api_uri.trim_end_matches('/')).map_err(|e| {
            GatewayError::new(format!("Invalid integration api_uri '{}': {e}", config.api_uri))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::new(format!(
                "Integration api_uri '{}' cannot be a base URL",
                config.api_uri
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::new(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            tokens: CustomerTokenIssuer::new(
                &config.workspace_key,
                &config.workspace_secret,
                config.token_ttl_secs,
            ),
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        tenant: &Tenant,
        method: Method,
        url: Url,
        body: Option<&Value>,
    ) -> Result<Value, GatewayError> {
        let token = self.tokens.issue(tenant)?;
        let auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| GatewayError::new("Invalid integration token format"))?;

        debug!(tenant_id = %tenant.id, %method, url = %url, "Integration request");

        let mut request = self.http.request(method, url).header(AUTHORIZATION, auth);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::new(format!("Integration request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::new(format!("Failed to read integration response: {e}")))?;

        if !status.is_success() {
            warn!(
                tenant_id = %tenant.id,
                status = status.as_u16(),
                body = %preview(&text),
                "Integration request rejected"
            );
            return Err(error_from_response(status, &text));
        }

        parse_success_body(&text)
    }
}

#[async_trait]
impl AccountingGateway for IntegrationClient {
    async fn list_connections(&self, tenant: &Tenant) -> Result<Vec<Connection>, GatewayError> {
        let body = self
            .send(tenant, Method::GET, self.endpoint(&["connections"]), None)
            .await?;

        let response: ConnectionsResponse = serde_json::from_value(body)
            .map_err(|e| GatewayError::new(format!("Unexpected connections response: {e}")))?;
        Ok(response.items)
    }

    async fn run_action(
        &self,
        tenant: &Tenant,
        connection_id: &str,
        action: &str,
        input: Option<Value>,
    ) -> Result<ActionRun, GatewayError> {
        let url = self.endpoint(&["connections", connection_id, "actions", action, "run"]);
        let input = input.unwrap_or_else(|| json!({}));

        let body = self.send(tenant, Method::POST, url, Some(&input)).await?;

        let output = match body {
            Value::Object(mut map) => map.remove("output").unwrap_or(Value::Null),
            _ => Value::Null,
        };
        Ok(ActionRun::from_output(output))
    }
}

/// Maps a non-2xx response to a gateway error.
///
/// A JSON body contributes its `message` and `data`; the whole body becomes
/// the payload when it has no `data` field.
fn error_from_response(status: StatusCode, text: &str) -> GatewayError {
    let fallback = format!("Request failed with status {}", status.as_u16());
    let err = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(mut body)) => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map_or(fallback, str::to_string);
            let data = body.remove("data").unwrap_or(Value::Object(body));
            GatewayError::new(message).with_data(data)
        }
        Ok(other) => GatewayError::new(fallback).with_data(other),
        Err(_) if text.trim().is_empty() => GatewayError::new(fallback),
        Err(_) => GatewayError::new(fallback).with_data(Value::String(text.to_string())),
    };
    err.with_status(status.as_u16())
}

/// Parses a 2xx body. An unreadable body is the platform's fault, so it is
/// reported as 502 rather than with the 2xx status.
fn parse_success_body(text: &str) -> Result<Value, GatewayError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| {
        GatewayError::new(format!("Failed to parse integration response: {e}"))
            .with_status(StatusCode::BAD_GATEWAY.as_u16())
            .with_data(Value::String(preview(text)))
    })
}

fn preview(body: &str) -> String {
    let mut preview: String = body.chars().take(MAX_LOG_BODY_CHARS).collect();
    if body.chars().count() > MAX_LOG_BODY_CHARS {
        preview.push_str("...");
    }
    preview
}
