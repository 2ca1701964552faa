//! The transport seam between resource clients and the network.
//!
//! # Design
//! Resource clients depend on the `Transport` trait only. `HttpTransport` is
//! the production implementation on `reqwest`; tests substitute a stub that
//! records descriptors. Status and envelope interpretation lives in
//! `parse_response`, a pure function over `HttpResponse`, so any transport
//! (including one driven by a host application) gets the same error mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::envelope::{message, SUCCESS_CODE};
use crate::error::ApiError;
use crate::http::{HttpResponse, Query, RequestContext, RequestDescriptor};

/// Executes request descriptors.
///
/// Implementations resolve to the parsed response body, or fail with the
/// transport/HTTP/envelope error. Resource clients pass errors through
/// unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: RequestDescriptor,
        context: &RequestContext,
    ) -> Result<Value, ApiError>;
}

/// `reqwest`-backed transport bound to one API root.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, ClientConfig::default().timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a descriptor path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: RequestDescriptor,
        context: &RequestContext,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(&request.url);
        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self.client.request(request.method.into(), &url);
        if let Some(params) = &request.params {
            builder = builder.query(&query_pairs(params));
        }
        if let Some(data) = &request.data {
            builder = builder.json(data);
        }
        if let Some(authorization) = context.authorization() {
            builder = builder.header(AUTHORIZATION, authorization);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, %url, error = %e, "request failed");
            ApiError::from(e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_response(HttpResponse { status, body }).inspect_err(|e| {
            tracing::warn!(method = %request.method, %url, status, error = %e, "request rejected");
        })
    }
}

/// Flatten a query object into string pairs.
///
/// Strings go through unquoted, nulls are dropped, and every other value is
/// sent as its JSON text.
pub fn query_pairs(params: &Query) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), rendered))
        })
        .collect()
}

/// Map an HTTP response onto the parsed body or an `ApiError`.
///
/// An empty 2xx body resolves to `Value::Null`.
pub fn parse_response(response: HttpResponse) -> Result<Value, ApiError> {
    check_status(&response)?;
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    let body: Value = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    check_envelope(&body)?;
    Ok(body)
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// Bodies without a numeric `code` are not envelopes and pass through.
fn check_envelope(body: &Value) -> Result<(), ApiError> {
    let Some(code) = body.get("code").and_then(Value::as_i64) else {
        return Ok(());
    };
    match code {
        SUCCESS_CODE => Ok(()),
        401 => Err(ApiError::Unauthorized),
        code => Err(ApiError::Backend {
            code,
            msg: message(body).unwrap_or_default().to_string(),
        }),
    }
}
