//! House listing endpoints under `/house/house`.
//!
//! Each operation is a `build_*` function producing a `RequestDescriptor`
//! plus a `HouseClient` method that dispatches it. Queries and payloads are
//! forwarded verbatim; the backend does all validation.

use serde_json::Value;

use crate::client::Dispatcher;
use crate::error::ApiError;
use crate::http::{Payload, Query, RequestDescriptor};
use crate::types::ResourceId;

pub const HOUSE_PATH: &str = "/house/house";

pub fn build_list_houses(query: Query) -> RequestDescriptor {
    RequestDescriptor::query(format!("{HOUSE_PATH}/list"), query)
}

pub fn build_get_house(id: impl Into<ResourceId>) -> RequestDescriptor {
    RequestDescriptor::get(format!("{HOUSE_PATH}/{}", id.into()))
}

pub fn build_get_house_detail(id: impl Into<ResourceId>) -> RequestDescriptor {
    RequestDescriptor::get(format!("{HOUSE_PATH}/detail/{}", id.into()))
}

pub fn build_add_house(data: Payload) -> RequestDescriptor {
    RequestDescriptor::post(HOUSE_PATH, data)
}

/// PUT to the collection path. The backend reads the key (`hoseId`) from
/// the body, so it must be present in `data` and never appears in the URL.
pub fn build_update_house(data: Payload) -> RequestDescriptor {
    RequestDescriptor::put(HOUSE_PATH, data)
}

/// The backend also accepts a comma-separated id list in the same position.
pub fn build_del_house(id: impl Into<ResourceId>) -> RequestDescriptor {
    RequestDescriptor::delete(format!("{HOUSE_PATH}/{}", id.into()))
}

#[derive(Debug, Clone)]
pub struct HouseClient {
    dispatcher: Dispatcher,
}

impl HouseClient {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn list_houses(&self, query: Query) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_list_houses(query)).await
    }

    pub async fn get_house(&self, id: impl Into<ResourceId>) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_get_house(id)).await
    }

    pub async fn get_house_detail(&self, id: impl Into<ResourceId>) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_get_house_detail(id)).await
    }

    pub async fn add_house(&self, data: Payload) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_add_house(data)).await
    }

    pub async fn update_house(&self, data: Payload) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_update_house(data)).await
    }

    pub async fn del_house(&self, id: impl Into<ResourceId>) -> Result<Value, ApiError> {
        self.dispatcher.dispatch(build_del_house(id)).await
    }
}
