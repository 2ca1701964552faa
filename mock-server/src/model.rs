use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

pub const SUCCESS: u16 = 200;
pub const UNAUTHORIZED: u16 = 401;
pub const ERROR: u16 = 500;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
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

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
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

/// `/house/house/list` filters. Text fields match by substring; orientation,
/// floor height and property type match exactly.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseFilter {
    pub hose_id: Option<String>,
    pub house_code: Option<String>,
    pub title: Option<String>,
    pub community: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub house_type: Option<String>,
    pub orientation: Option<String>,
    pub floor_height: Option<i64>,
    pub floor_type: Option<String>,
    pub building_year: Option<String>,
    pub decoration_type: Option<String>,
    pub tags: Option<String>,
    pub property_right_type: Option<String>,
    pub property_right_year: Option<String>,
    pub property_type: Option<String>,
    pub page_num: Option<usize>,
    pub page_size: Option<usize>,
}

impl HouseFilter {
    pub fn matches(&self, house: &House) -> bool {
        like(&house.hose_id, &self.hose_id)
            && like(&house.house_code, &self.house_code)
            && like(&house.title, &self.title)
            && like(&house.community, &self.community)
            && like(&house.city, &self.city)
            && like(&house.town, &self.town)
            && like(&house.house_type, &self.house_type)
            && equals(&house.orientation, &self.orientation)
            && self.floor_height.map_or(true, |h| house.floor_height == Some(h))
            && like(&house.floor_type, &self.floor_type)
            && like(&house.building_year.map(|y| y.to_string()), &self.building_year)
            && like(&house.decoration_type, &self.decoration_type)
            && like(&house.tags, &self.tags)
            && like(&house.property_right_type, &self.property_right_type)
            && like(&house.property_right_year, &self.property_right_year)
            && equals(&house.property_type, &self.property_type)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendFilter {
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub page_num: Option<usize>,
    pub page_size: Option<usize>,
}

impl RecommendFilter {
    pub fn matches(&self, recommend: &Recommend) -> bool {
        self.user_id.map_or(true, |id| recommend.user_id == Some(id))
            && like(&recommend.user_name, &self.user_name)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageParams {
    pub page_num: Option<usize>,
    pub page_size: Option<usize>,
}

/// Filters shared by the statistics endpoints. Tags match by substring, the
/// rest exactly.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsFilter {
    pub community: Option<String>,
    pub town: Option<String>,
    pub house_type: Option<String>,
    pub orientation: Option<String>,
    pub decoration_type: Option<String>,
    pub tags: Option<String>,
}

impl StatisticsFilter {
    pub fn matches(&self, house: &House) -> bool {
        equals(&house.town, &self.town)
            && equals(&house.community, &self.community)
            && equals(&house.house_type, &self.house_type)
            && equals(&house.orientation, &self.orientation)
            && equals(&house.decoration_type, &self.decoration_type)
            && like(&house.tags, &self.tags)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsItem {
    pub name: Option<String>,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

/// `{code, msg, data?}` envelope for single-record and message responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct AjaxResponse<T = Value> {
    pub code: u16,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> AjaxResponse<T> {
    pub fn with_data(data: Option<T>) -> Self {
        Self {
            code: SUCCESS,
            msg: "query succeeded".to_string(),
            data,
        }
    }
}

impl AjaxResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        Self::message(SUCCESS, msg)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::message(ERROR, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::message(UNAUTHORIZED, msg)
    }

    fn message(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// `{code, msg, rows, total}` envelope for list responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct TableResponse<T> {
    pub code: u16,
    pub msg: String,
    pub rows: Vec<T>,
    pub total: usize,
}

impl<T: Clone> TableResponse<T> {
    /// One page of `items`; `total` counts all of them.
    pub fn page(items: &[T], page_num: Option<usize>, page_size: Option<usize>, msg: &str) -> Self {
        let page_num = page_num.unwrap_or(1).max(1);
        let page_size = page_size.unwrap_or(10).max(1);
        let rows = items
            .iter()
            .skip((page_num - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();
        Self {
            code: SUCCESS,
            msg: msg.to_string(),
            rows,
            total: items.len(),
        }
    }
}

/// Overlay the fields set in `patch` onto `current`.
pub fn merge<T: Serialize + DeserializeOwned>(current: &T, patch: &T) -> Result<T, serde_json::Error> {
    let mut merged = serde_json::to_value(current)?;
    if let (Value::Object(base), Value::Object(changes)) = (&mut merged, serde_json::to_value(patch)?) {
        base.extend(changes.into_iter().filter(|(_, v)| !v.is_null()));
    }
    serde_json::from_value(merged)
}

/// Empty patterns match everything.
fn like(value: &Option<String>, pattern: &Option<String>) -> bool {
    match pattern.as_deref().filter(|p| !p.is_empty()) {
        None => true,
        Some(p) => value.as_deref().is_some_and(|v| v.contains(p)),
    }
}

fn equals(value: &Option<String>, expected: &Option<String>) -> bool {
    match expected.as_deref().filter(|e| !e.is_empty()) {
        None => true,
        Some(e) => value.as_deref() == Some(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(id: &str, town: &str, orientation: &str) -> House {
        House {
            hose_id: Some(id.to_string()),
            town: Some(town.to_string()),
            orientation: Some(orientation.to_string()),
            ..House::default()
        }
    }

    #[test]
    fn house_serializes_camel_case_without_nulls() {
        let json = serde_json::to_value(house("h-1", "Futian", "south")).unwrap();
        assert_eq!(json["hoseId"], "h-1");
        assert_eq!(json["town"], "Futian");
        assert!(json.get("unitPrice").is_none());
    }

    #[test]
    fn house_filter_town_is_substring() {
        let filter: HouseFilter = serde_json::from_str(r#"{"town":"Fut"}"#).unwrap();
        assert!(filter.matches(&house("h-1", "Futian", "south")));
        assert!(!filter.matches(&house("h-2", "Nanshan", "south")));
    }

    #[test]
    fn house_filter_orientation_is_exact() {
        let filter: HouseFilter = serde_json::from_str(r#"{"orientation":"south"}"#).unwrap();
        assert!(filter.matches(&house("h-1", "Futian", "south")));
        assert!(!filter.matches(&house("h-2", "Futian", "south north")));
    }

    #[test]
    fn empty_filter_values_match_everything() {
        let filter: HouseFilter = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert!(filter.matches(&House::default()));
    }

    #[test]
    fn statistics_filter_tags_substring_town_exact() {
        let filter: StatisticsFilter = serde_json::from_str(r#"{"tags":"metro","town":"Futian"}"#).unwrap();
        let mut h = house("h-1", "Futian", "south");
        h.tags = Some("near metro,school".to_string());
        assert!(filter.matches(&h));
        h.town = Some("Futian East".to_string());
        assert!(!filter.matches(&h));
    }

    #[test]
    fn merge_overlays_only_set_fields() {
        let current = house("h-1", "Futian", "south");
        let patch = House {
            hose_id: Some("h-1".to_string()),
            title: Some("Renovated".to_string()),
            ..House::default()
        };
        let merged = merge(&current, &patch).unwrap();
        assert_eq!(merged.title.as_deref(), Some("Renovated"));
        assert_eq!(merged.town.as_deref(), Some("Futian"));
    }

    #[test]
    fn table_page_slices_and_counts_all() {
        let items: Vec<u32> = (1..=25).collect();
        let page = TableResponse::page(&items, Some(3), Some(10), "ok");
        assert_eq!(page.rows, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
    }

    #[test]
    fn table_page_zero_is_first_page() {
        let items = vec!["a", "b"];
        let page = TableResponse::page(&items, Some(0), None, "ok");
        assert_eq!(page.rows, vec!["a", "b"]);
    }

    #[test]
    fn error_envelope_omits_data() {
        let json = serde_json::to_value(AjaxResponse::error("delete failed")).unwrap();
        assert_eq!(json, serde_json::json!({"code": 500, "msg": "delete failed"}));
    }
}
