//! Recommendation endpoints under `/house/recommend`.
//!
//! Same CRUD shape as the house endpoints, plus the caller-scoped
//! `my-recommendations` listing. That one carries no user id: the backend
//! resolves the caller from the credentials in the `RequestContext`.

use serde_json::Value;

use crate::client::Dispatcher;
use crate::error::ApiError;
use crate::http::{Payload, Query, RequestDescriptor};
use crate::types::ResourceId;

pub const RECOMMEND_PATH: &str = "/house/recommend";

pub fn build_list_recommend(query: Query) -> RequestDescriptor {
    RequestDescriptor::query(format!("{RECOMMEND_PATH}/list"), query)
}

pub fn build_get_recommend(id: impl Into<ResourceId>) -> RequestDescriptor {
    RequestDescriptor::get(format!("{RECOMMEND_PATH}/{}", id.into()))
}

pub fn build_add_recommend(data: Payload) -> RequestDescriptor {
    RequestDescriptor::post(RECOMMEND_PATH, data)
}

/// PUT without a path key; `id` travels in the body.
pub fn build_update_recommend(data: Payload) -> RequestDescriptor {
    RequestDescriptor::put(RECOMMEND_PATH, data)
}

pub fn build_del_recommend(id: impl Into<ResourceId>) -> RequestDescriptor {
    RequestDescriptor::delete(format!("{RECOMMEND_PATH}/{}", id.into()))
}

pub fn build_list_my_recommendations(query: Query) -> RequestDescriptor {
    RequestDescriptor::query(format!("{RECOMMEND_PATH}/my-recommendations"), query)
}

#[derive(Debug, Clone)]
pub struct RecommendClient {
    dispatcher: Dispatcher,
}

impl RecommendClient {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list_recommend(&self, query: Query) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_list_recommend(query)).await
    }

    pub async fn get_recommend(&self, id: impl Into<ResourceId>) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_get_recommend(id)).await
    }

    pub async fn add_recommend(&self, data: Payload) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_add_recommend(data)).await
    }

    pub async fn update_recommend(&self, data: Payload) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_update_recommend(data)).await
    }

    pub async fn del_recommend(&self, id: impl Into<ResourceId>) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_del_recommend(id)).await
    }

    /// Houses recommended to whoever the context identifies.
    pub async fn list_my_recommendations(&self, query: Query) -> Result<Value, ApiError> {
        if self.dispatcher.context().token().is_none() {
            tracing::debug!("listing my recommendations without credentials");
        }
        self.dispatcher
            .dispatch(build_list_my_recommendations(query))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http::{HttpMethod, RequestContext};
    use crate::test_support::RecordingTransport;
    use serde_json::json;

    fn object(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn del_recommend_embeds_string_id() {
        let req = build_del_recommend("r-9");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"url": "/house/recommend/r-9", "method": "delete"})
        );
    }

    #[test]
    fn get_recommend_embeds_numeric_id() {
        let req = build_get_recommend(5);
        assert_eq!(req.url, "/house/recommend/5");
        assert_eq!(req.method, HttpMethod::Get);
    }

    #[test]
    fn list_recommend_forwards_query() {
        let query = object(json!({"userName": "alice"}));
        let req = build_list_recommend(query.clone());
        assert_eq!(req.url, "/house/recommend/list");
        assert_eq!(req.params, Some(query));
    }

    #[test]
    fn add_and_update_share_collection_path() {
        let data = object(json!({"id": 3, "userId": 1, "content": "[\"h-1\"]"}));
        let add = build_add_recommend(data.clone());
        let update = build_update_recommend(data.clone());
        assert_eq!(add.url, "/house/recommend");
        assert_eq!(add.method, HttpMethod::Post);
        assert_eq!(update.url, "/house/recommend");
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.data, Some(data));
    }

    #[test]
    fn my_recommendations_descriptor() {
        let req = build_list_my_recommendations(object(json!({"page": 1})));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "url": "/house/recommend/my-recommendations",
                "method": "get",
                "params": {"page": 1}
            })
        );
    }

    #[tokio::test]
    async fn my_recommendations_sends_caller_identity() {
        let transport = Arc::new(RecordingTransport::new());
        let client = RecommendClient::new(Dispatcher::new(
            transport.clone(),
            RequestContext::with_token("alice"),
        ));

        client
            .list_my_recommendations(object(json!({"pageNum": 1})))
            .await
            .unwrap();

        let req = transport.only_request().unwrap();
        assert_eq!(req.url, "/house/recommend/my-recommendations");
        assert_eq!(req.params, Some(object(json!({"pageNum": 1}))));
        assert_eq!(transport.contexts()[0].token(), Some("alice"));
    }

    #[tokio::test]
    async fn unauthorized_passes_through() {
        let transport = Arc::new(RecordingTransport::with_response(200, r#"{"code":401,"msg":"login required"}"#));
        let client = RecommendClient::new(Dispatcher::new(transport.clone(), RequestContext::anonymous()));
        let err = client.list_my_recommendations(Query::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
