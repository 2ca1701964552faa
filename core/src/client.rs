//! Entry point tying a transport and a caller identity to the resource clients.
//!
//! # Design
//! `HouseApi` holds only an `Arc<dyn Transport>` and a `RequestContext`. It is
//! cheap to clone and carries no mutable state between calls. Each resource
//! client shares the same `Dispatcher`, whose single job is to hand a freshly
//! built descriptor to the transport along with the context.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::house::HouseClient;
use crate::http::{RequestContext, RequestDescriptor};
use crate::recommend::RecommendClient;
use crate::statistics::StatisticsClient;
use crate::transport::{HttpTransport, Transport};

/// Sends descriptors through a shared transport on behalf of one caller.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    context: RequestContext,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, context: RequestContext) -> Self {
        Self { transport, context }
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Hand one descriptor to the transport and return its result untouched.
    pub async fn dispatch(&self, request: RequestDescriptor) -> Result<Value, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, "dispatching");
        self.transport.send(request, &self.context).await
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Facade over the house, recommendation and statistics clients.
#[derive(Debug, Clone)]
pub struct HouseApi {
    dispatcher: Dispatcher,
}

impl HouseApi {
    pub fn new(transport: Arc<dyn Transport>, context: RequestContext) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport, context),
        }
    }

    /// Build an `HttpTransport` and context from configuration.
    pub fn connect(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::from_config(config)?;
        tracing::debug!(base_url = transport.base_url(), "connecting");
        Ok(Self::new(Arc::new(transport), config.context()))
    }

    /// Same transport, different caller.
    pub fn with_context(&self, context: RequestContext) -> Self {
        Self {
            dispatcher: Dispatcher::new(self.dispatcher.transport.clone(), context),
        }
    }

    pub fn context(&self) -> &RequestContext {
        self.dispatcher.context()
    }

    pub fn house(&self) -> HouseClient {
        HouseClient::new(self.dispatcher.clone())
    }

    pub fn recommend(&self) -> RecommendClient {
        RecommendClient::new(self.dispatcher.clone())
    }

    pub fn statistics(&self) -> StatisticsClient {
        StatisticsClient::new(self.dispatcher.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, Query};
    use crate::test_support::RecordingTransport;

    #[tokio::test]
    async fn clients_share_transport_and_context() {
        let transport = Arc::new(RecordingTransport::new());
        let api = HouseApi::new(transport.clone(), RequestContext::with_token("alice"));

        api.house().get_house(1).await.unwrap();
        api.recommend().list_my_recommendations(Query::new()).await.unwrap();
        api.statistics().get_town_statistics(Query::new()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.method == HttpMethod::Get));
        assert!(transport
            .contexts()
            .iter()
            .all(|ctx| ctx.token() == Some("alice")));
    }

    #[tokio::test]
    async fn with_context_switches_identity_only() {
        let transport = Arc::new(RecordingTransport::new());
        let api = HouseApi::new(transport.clone(), RequestContext::anonymous());
        let bob = api.with_context(RequestContext::with_token("bob"));

        api.house().get_house("h-1").await.unwrap();
        bob.house().get_house("h-1").await.unwrap();

        let contexts = transport.contexts();
        assert_eq!(contexts[0], RequestContext::anonymous());
        assert_eq!(contexts[1].token(), Some("bob"));
        assert_eq!(bob.context().token(), Some("bob"));
    }

    #[test]
    fn connect_uses_config_token() {
        let config = ClientConfig {
            token: Some("carol".to_string()),
            ..ClientConfig::default()
        };
        let api = HouseApi::connect(&config).unwrap();
        assert_eq!(api.context().token(), Some("carol"));
    }
}
