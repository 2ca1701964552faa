//! Domain DTOs for the house backend.
//!
//! # Design
//! The resource clients accept raw `Query`/`Payload` maps so anything the
//! backend understands can be forwarded untouched. These types are the typed
//! alternative: build a `House` or `StatisticsQuery`, then turn it into a map
//! with `to_query` / `to_payload`. Field names use camelCase on the wire and
//! unset fields are omitted, so a partially filled DTO makes a partial update.
//!
//! The mock-server crate defines its own copies of these shapes; integration
//! tests catch any drift between the two.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{Payload, Query};

/// Opaque record key. Houses use string keys, recommendations numeric ones;
/// the client renders either verbatim into the URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{id}"),
            ResourceId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId::Int(i64::from(id))
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        ResourceId::Int(i64::from(id))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Str(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Str(id)
    }
}

impl From<&String> for ResourceId {
    fn from(id: &String) -> Self {
        ResourceId::Str(id.clone())
    }
}

/// A house listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hose_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_right_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_right_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_intro: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
}

/// A stored recommendation for one user. `content` holds a JSON array of
/// recommended house ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
}

/// Filters shared by every statistics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// Paging parameters understood by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: 10,
        }
    }
}

/// One aggregation bucket returned by the statistics endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsItem {
    pub name: Option<String>,
    pub value: Option<f64>,
    #[serde(default)]
    pub avg: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
}

/// Serialize a typed filter into a query object.
pub fn to_query<T: Serialize>(value: &T) -> Result<Query, ApiError> {
    to_object(value)
}

/// Serialize a typed record into a request body object.
pub fn to_payload<T: Serialize>(value: &T) -> Result<Payload, ApiError> {
    to_object(value)
}

/// Merge several query objects left to right; later keys win.
///
/// Handy for combining a filter DTO with a `PageQuery`.
pub fn merge_queries(parts: impl IntoIterator<Item = Query>) -> Query {
    parts.into_iter().fold(Query::new(), |mut acc, part| {
        acc.extend(part);
        acc
    })
}

/// Deserialize a JSON value returned by a transport into a typed record.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn to_object<T: Serialize>(value: &T) -> Result<serde_json::Map<String, Value>, ApiError> {
    match serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Serialization(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
