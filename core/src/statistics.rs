//! Read-only aggregation endpoints under `/house/statistics`.
//!
//! Every dimension takes the same filter object and differs only in the path
//! segment. The returned buckets are passed back uninterpreted; decode them
//! with `envelope::decode_data::<Vec<StatisticsItem>>` if needed.

use std::fmt;

use serde_json::Value;

use crate::client::Dispatcher;
use crate::error::ApiError;
use crate::http::{Query, RequestDescriptor};

pub const STATISTICS_PATH: &str = "/house/statistics";

/// The column a statistics endpoint groups houses by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticsDimension {
    Orientation,
    Town,
    Price,
    Tags,
    HouseType,
    FloorType,
    Community,
}

impl StatisticsDimension {
    pub const ALL: [StatisticsDimension; 7] = [
        StatisticsDimension::Orientation,
        StatisticsDimension::Town,
        StatisticsDimension::Price,
        StatisticsDimension::Tags,
        StatisticsDimension::HouseType,
        StatisticsDimension::FloorType,
        StatisticsDimension::Community,
    ];

    pub fn path_segment(&self) -> &'static str {
        match self {
            StatisticsDimension::Orientation => "orientation",
            StatisticsDimension::Town => "town",
            StatisticsDimension::Price => "price",
            StatisticsDimension::Tags => "tags",
            StatisticsDimension::HouseType => "house_type",
            StatisticsDimension::FloorType => "floor_type",
            StatisticsDimension::Community => "community",
        }
    }
}

impl fmt::Display for StatisticsDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

pub fn build_statistics(dimension: StatisticsDimension, query: Query) -> RequestDescriptor {
    RequestDescriptor::query(
        format!("{STATISTICS_PATH}/{}", dimension.path_segment()),
        query,
    )
}

#[derive(Debug, Clone)]
pub struct StatisticsClient {
    dispatcher: Dispatcher,
}

impl StatisticsClient {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn get_statistics(
        &self,
        dimension: StatisticsDimension,
        query: Query,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .dispatch(build_statistics(dimension, query))
            .await
    }

    pub async fn get_orientation_statistics(&self, query: Query) -> Result<Value, ApiError> {
        self.get_statistics(StatisticsDimension::Orientation, query).await
    }

    pub async fn get_town_statistics(&self, query: Query) -> Result<Value, ApiError> {
        self.get_statistics(StatisticsDimension::Town, query).await
    }

    /// Counts per unit-price range rather than per distinct value.
    pub async fn get_price_statistics(&self, query: Query) -> Result<Value, ApiError> {
        self.get_statistics(StatisticsDimension::Price, query).await
    }

    pub async fn get_tags_statistics(&self, query: Query) -> Result<Value, ApiError> {
        self.get_statistics(StatisticsDimension::Tags, query).await
    }

    pub async fn get_house_type_statistics(&self, query: Query) -> Result<Value, ApiError> {
        self.get_statistics(StatisticsDimension::HouseType, query).await
    }

    pub async fn get_floor_type_statistics(&self, query: Query) -> Result<Value, ApiError> {
        self.get_statistics(StatisticsDimension::FloorType, query).await
    }

    pub async fn get_community_statistics(&self, query: Query) -> Result<Value, ApiError> {
        self.get_statistics(StatisticsDimension::Community, query).await
    }
}
