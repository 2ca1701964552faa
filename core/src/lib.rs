//! Async API client for the house listing backend.
//!
//! # Overview
//! One resource client per backend area: house listings, recommendations and
//! statistics. Every operation builds a `RequestDescriptor` (path, method,
//! query or body) and hands it to an injected `Transport`, returning the
//! transport's result unchanged.
//!
//! # Design
//! - `build_*` functions are pure, so descriptors can be checked without I/O.
//! - Clients hold only an `Arc<dyn Transport>` and a `RequestContext`; no state
//!   survives between calls.
//! - Caller identity lives in `RequestContext`, never in global state.
//! - Update operations PUT to the collection path with the key in the body,
//!   which is what the backend controllers expect.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod house;
pub mod http;
pub mod recommend;
pub mod statistics;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod transport;
pub mod types;

pub use client::{Dispatcher, HouseApi};
pub use config::ClientConfig;
pub use envelope::{decode_data, decode_table, Page};
pub use error::ApiError;
pub use house::HouseClient;
pub use http::{HttpMethod, HttpResponse, Payload, Query, RequestContext, RequestDescriptor};
pub use recommend::RecommendClient;
pub use statistics::{StatisticsClient, StatisticsDimension};
pub use transport::{HttpTransport, Transport};
pub use types::{House, PageQuery, Recommend, ResourceId, StatisticsItem, StatisticsQuery};
