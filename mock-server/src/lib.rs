//! In-memory stand-in for the house backend.
//!
//! Serves the house, recommendation and statistics routes with the backend's
//! `{code, msg, ...}` envelopes. Business failures answer HTTP 200 with a
//! non-200 `code`, the same way the real backend does.

pub mod model;
pub mod statistics;

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use model::{
    AjaxResponse, House, HouseFilter, PageParams, Recommend, RecommendFilter, StatisticsFilter,
    StatisticsItem, TableResponse,
};
use statistics::Dimension;

#[derive(Debug, Default)]
pub struct Store {
    houses: BTreeMap<String, House>,
    recommends: BTreeMap<i64, Recommend>,
    next_recommend_id: i64,
}

impl Store {
    /// Insert or replace a house; a missing `hoseId` gets a fresh UUID.
    pub fn insert_house(&mut self, mut house: House) -> String {
        let id = house
            .hose_id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        self.houses.insert(id.clone(), house);
        id
    }

    /// Insert a recommendation under the next numeric id.
    pub fn insert_recommend(&mut self, mut recommend: Recommend) -> i64 {
        self.next_recommend_id += 1;
        let id = self.next_recommend_id;
        recommend.id = Some(id);
        self.recommends.insert(id, recommend);
        id
    }

    /// The newest recommendation stored for `user_name`.
    fn latest_recommend_for(&self, user_name: &str) -> Option<&Recommend> {
        self.recommends
            .values()
            .rev()
            .find(|r| r.user_name.as_deref() == Some(user_name))
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/house/house/list", get(list_houses))
        .route("/house/house/detail/{id}", get(get_house_detail))
        .route("/house/house", post(add_house).put(update_house))
        .route("/house/house/{id}", get(get_house).delete(delete_houses))
        .route("/house/recommend/list", get(list_recommends))
        .route("/house/recommend/my-recommendations", get(my_recommendations))
        .route("/house/recommend", post(add_recommend).put(update_recommend))
        .route("/house/recommend/{id}", get(get_recommend).delete(delete_recommends))
        .route("/house/statistics/{dimension}", get(statistics_by_dimension))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- houses ---

async fn list_houses(
    State(db): State<Db>,
    Query(filter): Query<HouseFilter>,
) -> Json<TableResponse<House>> {
    let store = db.read().await;
    let matched: Vec<House> = store
        .houses
        .values()
        .filter(|h| filter.matches(h))
        .cloned()
        .collect();
    Json(TableResponse::page(&matched, filter.page_num, filter.page_size, "query succeeded"))
}

async fn get_house(State(db): State<Db>, Path(id): Path<String>) -> Json<AjaxResponse<House>> {
    let store = db.read().await;
    Json(AjaxResponse::with_data(store.houses.get(&id).cloned()))
}

async fn get_house_detail(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Json<AjaxResponse<House>> {
    let store = db.read().await;
    Json(AjaxResponse::with_data(store.houses.get(&id).cloned()))
}

async fn add_house(State(db): State<Db>, Json(input): Json<House>) -> Json<AjaxResponse> {
    let mut store = db.write().await;
    if let Some(id) = &input.hose_id {
        if store.houses.contains_key(id) {
            return Json(AjaxResponse::error(format!("add failed: house {id} already exists")));
        }
    }
    let id = store.insert_house(input);
    tracing::debug!(%id, "house added");
    Json(AjaxResponse::success("added"))
}

async fn update_house(State(db): State<Db>, Json(input): Json<House>) -> Json<AjaxResponse> {
    let mut store = db.write().await;
    let Some(current) = input.hose_id.as_ref().and_then(|id| store.houses.get(id)) else {
        return Json(AjaxResponse::error("update failed"));
    };
    match model::merge(current, &input) {
        Ok(updated) => {
            store.insert_house(updated);
            Json(AjaxResponse::success("updated"))
        }
        Err(e) => Json(AjaxResponse::error(format!("update failed: {e}"))),
    }
}

async fn delete_houses(State(db): State<Db>, Path(ids): Path<String>) -> Json<AjaxResponse> {
    let mut store = db.write().await;
    let removed = ids
        .split(',')
        .filter(|id| store.houses.remove(id.trim()).is_some())
        .count();
    if removed > 0 {
        Json(AjaxResponse::success("deleted"))
    } else {
        Json(AjaxResponse::error("delete failed"))
    }
}

// --- recommendations ---

async fn list_recommends(
    State(db): State<Db>,
    Query(filter): Query<RecommendFilter>,
) -> Json<TableResponse<Recommend>> {
    let store = db.read().await;
    let matched: Vec<Recommend> = store
        .recommends
        .values()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    Json(TableResponse::page(&matched, filter.page_num, filter.page_size, "query succeeded"))
}

/// Non-numeric ids do not match the route, as with the backend's int converter.
async fn get_recommend(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<AjaxResponse<Recommend>>, StatusCode> {
    let id: i64 = id.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let store = db.read().await;
    Ok(Json(AjaxResponse::with_data(store.recommends.get(&id).cloned())))
}

async fn add_recommend(State(db): State<Db>, Json(input): Json<Recommend>) -> Json<AjaxResponse> {
    let id = db.write().await.insert_recommend(input);
    tracing::debug!(id, "recommendation added");
    Json(AjaxResponse::success("added"))
}

async fn update_recommend(
    State(db): State<Db>,
    Json(input): Json<Recommend>,
) -> Json<AjaxResponse> {
    let mut store = db.write().await;
    let Some(id) = input.id else {
        return Json(AjaxResponse::error("update failed"));
    };
    let Some(current) = store.recommends.get(&id) else {
        return Json(AjaxResponse::error("update failed"));
    };
    match model::merge(current, &input) {
        Ok(updated) => {
            store.recommends.insert(id, updated);
            Json(AjaxResponse::success("updated"))
        }
        Err(e) => Json(AjaxResponse::error(format!("update failed: {e}"))),
    }
}

async fn delete_recommends(State(db): State<Db>, Path(ids): Path<String>) -> Json<AjaxResponse> {
    let parsed: Result<Vec<i64>, _> = ids.split(',').map(|id| id.trim().parse::<i64>()).collect();
    let ids = match parsed {
        Ok(ids) => ids,
        Err(e) => return Json(AjaxResponse::error(format!("delete failed: {e}"))),
    };
    let mut store = db.write().await;
    let removed = ids
        .iter()
        .filter(|id| store.recommends.remove(*id).is_some())
        .count();
    if removed > 0 {
        Json(AjaxResponse::success("deleted"))
    } else {
        Json(AjaxResponse::error("delete failed"))
    }
}

/// Houses from the caller's latest recommendation. The bearer token is the
/// user name.
async fn my_recommendations(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(page): Query<PageParams>,
) -> Response {
    let Some(user) = bearer_token(&headers) else {
        return Json(AjaxResponse::unauthorized("login required")).into_response();
    };
    let store = db.read().await;
    let house_ids: Vec<String> = store
        .latest_recommend_for(&user)
        .and_then(|r| r.content.as_deref())
        .and_then(|content| serde_json::from_str(content).ok())
        .unwrap_or_default();
    let houses: Vec<House> = house_ids
        .iter()
        .filter_map(|id| store.houses.get(id).cloned())
        .collect();
    tracing::debug!(%user, total = houses.len(), "serving recommendations");

    let msg = if houses.is_empty() {
        "no recommendations"
    } else {
        "query succeeded"
    };
    Json(TableResponse::page(&houses, page.page_num, page.page_size, msg)).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

// --- statistics ---

async fn statistics_by_dimension(
    State(db): State<Db>,
    Path(dimension): Path<String>,
    Query(filter): Query<StatisticsFilter>,
) -> Result<Json<AjaxResponse<Vec<StatisticsItem>>>, StatusCode> {
    let dimension = Dimension::from_segment(&dimension).ok_or(StatusCode::NOT_FOUND)?;
    let store = db.read().await;
    let houses: Vec<&House> = store.houses.values().filter(|h| filter.matches(h)).collect();
    Ok(Json(AjaxResponse::with_data(Some(statistics::compute(
        dimension, &houses,
    )))))
}
