//! A recording transport for exercising resource clients without a network.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpResponse, RequestContext, RequestDescriptor};
use crate::transport::{parse_response, Transport};

/// Records every descriptor it is handed and answers with one canned response.
///
/// The canned response goes through `parse_response`, so a stub configured
/// with a failure envelope fails exactly like `HttpTransport` would.
#[derive(Debug)]
pub struct RecordingTransport {
    status: u16,
    body: String,
    sent: Mutex<Vec<(RequestDescriptor, RequestContext)>>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::with_response(200, r#"{"code":200,"msg":"ok"}"#)
    }
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Every descriptor sent so far, oldest first.
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.lock().iter().map(|(req, _)| req.clone()).collect()
    }

    /// Every context sent so far, oldest first.
    pub fn contexts(&self) -> Vec<RequestContext> {
        self.lock().iter().map(|(_, ctx)| ctx.clone()).collect()
    }

    /// The single recorded descriptor, or `None` if zero or several were sent.
    pub fn only_request(&self) -> Option<RequestDescriptor> {
        let sent = self.lock();
        match sent.as_slice() {
            [(req, _)] => Some(req.clone()),
            _ => None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(RequestDescriptor, RequestContext)>> {
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        request: RequestDescriptor,
        context: &RequestContext,
    ) -> Result<Value, ApiError> {
        self.lock().push((request, context.clone()));
        parse_response(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
