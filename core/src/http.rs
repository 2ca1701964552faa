//! Request and response types for the injected-transport pattern.
//!
//! # Design
//! A `RequestDescriptor` describes one backend call as plain data: a path
//! relative to the API root, a method, and either query parameters or a JSON
//! body. Resource clients build descriptors and hand them to a `Transport`;
//! they never touch the network themselves.
//!
//! Caller identity does not live in the descriptor. It travels next to it as a
//! `RequestContext`, so the same descriptor can be sent on behalf of different
//! users.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filter fields forwarded verbatim as query-string parameters.
pub type Query = Map<String, Value>;

/// Record state forwarded verbatim as a JSON request body.
pub type Payload = Map<String, Value>;

/// HTTP method for a request. Serializes lowercase (`"get"`, `"put"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One backend call described as plain data.
///
/// `url` is relative to the API root (for example `/house/house/42`); the
/// transport is responsible for joining it with a base URL. At most one of
/// `params` and `data` is set by the resource clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Query>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
}

impl RequestDescriptor {
    pub fn get(url: impl Into<String>) -> Self {
        Self::bare(url, HttpMethod::Get)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::bare(url, HttpMethod::Delete)
    }

    /// GET with query parameters.
    pub fn query(url: impl Into<String>, params: Query) -> Self {
        Self {
            params: Some(params),
            ..Self::get(url)
        }
    }

    pub fn post(url: impl Into<String>, data: Payload) -> Self {
        Self {
            data: Some(data),
            ..Self::bare(url, HttpMethod::Post)
        }
    }

    pub fn put(url: impl Into<String>, data: Payload) -> Self {
        Self {
            data: Some(data),
            ..Self::bare(url, HttpMethod::Put)
        }
    }

    fn bare(url: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            url: url.into(),
            method,
            params: None,
            data: None,
        }
    }
}

/// Caller identity sent alongside every descriptor.
///
/// An anonymous context sends no credentials. Identity-scoped endpoints such
/// as `my-recommendations` rely on the token being present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Value for the `Authorization` header, if any.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a transport after executing a request, then handed to
/// `transport::parse_response` for status and envelope checks.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
