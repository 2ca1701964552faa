use std::collections::BTreeMap;

use crate::model::{House, StatisticsItem};

/// Unit-price range bounds used by the price dimension.
pub const PRICE_BOUNDS: [f64; 5] = [8000.0, 12000.0, 20000.0, 30000.0, 40000.0];

/// Community statistics return at most this many groups.
pub const COMMUNITY_LIMIT: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Orientation,
    Town,
    Price,
    Tags,
    HouseType,
    FloorType,
    Community,
}

impl Dimension {
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "orientation" => Some(Dimension::Orientation),
            "town" => Some(Dimension::Town),
            "price" => Some(Dimension::Price),
            "tags" => Some(Dimension::Tags),
            "house_type" => Some(Dimension::HouseType),
            "floor_type" => Some(Dimension::FloorType),
            "community" => Some(Dimension::Community),
            _ => None,
        }
    }

    fn key(&self, house: &House) -> Option<String> {
        match self {
            Dimension::Orientation => house.orientation.clone(),
            Dimension::Town => house.town.clone(),
            Dimension::Tags => house.tags.clone(),
            Dimension::HouseType => house.house_type.clone(),
            Dimension::FloorType => house.floor_type.clone(),
            Dimension::Community => house.community.clone(),
            // Price is bucketed by `price_ranges`, never grouped by value.
            Dimension::Price => None,
        }
    }

    /// Orientation and town keep houses with no value as a `null` group.
    fn keeps_null_group(&self) -> bool {
        matches!(self, Dimension::Orientation | Dimension::Town)
    }
}

pub fn compute(dimension: Dimension, houses: &[&House]) -> Vec<StatisticsItem> {
    match dimension {
        Dimension::Price => price_ranges(houses, &PRICE_BOUNDS),
        Dimension::Community => {
            let mut items = group_by(dimension, houses);
            items.truncate(COMMUNITY_LIMIT);
            items
        }
        _ => group_by(dimension, houses),
    }
}

/// Count per distinct value with unit-price avg/max/min, largest group first.
pub fn group_by(dimension: Dimension, houses: &[&House]) -> Vec<StatisticsItem> {
    let mut groups: BTreeMap<Option<String>, (usize, Vec<f64>)> = BTreeMap::new();
    for house in houses {
        let key = dimension.key(house);
        if key.is_none() && !dimension.keeps_null_group() {
            continue;
        }
        let entry = groups.entry(key).or_default();
        entry.0 += 1;
        if let Some(price) = house.unit_price {
            entry.1.push(price);
        }
    }

    let mut items: Vec<StatisticsItem> = groups
        .into_iter()
        .map(|(name, (count, prices))| StatisticsItem {
            name,
            value: count as f64,
            avg: (!prices.is_empty()).then(|| prices.iter().sum::<f64>() / prices.len() as f64),
            max: prices.iter().copied().reduce(f64::max),
            min: prices.iter().copied().reduce(f64::min),
        })
        .collect();
    items.sort_by(|a, b| b.value.total_cmp(&a.value));
    items
}

/// Count houses per unit-price range, cheapest range first. Empty ranges are
/// left out.
pub fn price_ranges(houses: &[&House], bounds: &[f64]) -> Vec<StatisticsItem> {
    let mut buckets: BTreeMap<usize, usize> = BTreeMap::new();
    for price in houses.iter().filter_map(|h| h.unit_price) {
        *buckets.entry(bucket_index(price, bounds)).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(index, count)| StatisticsItem {
            name: Some(bucket_label(index, bounds)),
            value: count as f64,
            ..StatisticsItem::default()
        })
        .collect()
}

/// 0 is below the first bound, `bounds.len()` at or above the last.
fn bucket_index(price: f64, bounds: &[f64]) -> usize {
    bounds.iter().take_while(|bound| price >= **bound).count()
}

fn bucket_label(index: usize, bounds: &[f64]) -> String {
    match index {
        0 => format!("<{}", format_price(bounds[0])),
        i if i >= bounds.len() => format!(">={}", format_price(bounds[bounds.len() - 1])),
        i => format!("{}-{}", format_price(bounds[i - 1]), format_price(bounds[i])),
    }
}

/// Below 10000 in thousands (`8K`), otherwise in ten-thousands (`2W`, `1.2W`).
pub fn format_price(price: f64) -> String {
    if price < 10000.0 {
        return format!("{}K", (price / 1000.0) as i64);
    }
    let w = price / 10000.0;
    if w.fract() == 0.0 {
        format!("{}W", w as i64)
    } else {
        format!("{w:.1}W")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(orientation: Option<&str>, community: Option<&str>, unit_price: Option<f64>) -> House {
        House {
            orientation: orientation.map(str::to_string),
            community: community.map(str::to_string),
            unit_price,
            ..House::default()
        }
    }

    #[test]
    fn format_price_units() {
        assert_eq!(format_price(8000.0), "8K");
        assert_eq!(format_price(12000.0), "1.2W");
        assert_eq!(format_price(20000.0), "2W");
        assert_eq!(format_price(40000.0), "4W");
    }

    #[test]
    fn price_ranges_bucket_and_order() {
        let houses = [
            house(None, None, Some(45000.0)),
            house(None, None, Some(5000.0)),
            house(None, None, Some(12000.0)),
            house(None, None, Some(13000.0)),
            house(None, None, Some(8000.0)),
            house(None, None, None),
        ];
        let refs: Vec<&House> = houses.iter().collect();
        let items = price_ranges(&refs, &PRICE_BOUNDS);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["<8K", "8K-1.2W", "1.2W-2W", ">=4W"]);
        let counts: Vec<f64> = items.iter().map(|i| i.value).collect();
        assert_eq!(counts, vec![1.0, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn group_by_orders_by_count_and_aggregates_price() {
        let houses = [
            house(Some("north"), None, Some(9000.0)),
            house(Some("south"), None, Some(10000.0)),
            house(Some("south"), None, Some(14000.0)),
        ];
        let refs: Vec<&House> = houses.iter().collect();
        let items = group_by(Dimension::Orientation, &refs);
        assert_eq!(items[0].name.as_deref(), Some("south"));
        assert_eq!(items[0].value, 2.0);
        assert_eq!(items[0].avg, Some(12000.0));
        assert_eq!(items[0].max, Some(14000.0));
        assert_eq!(items[0].min, Some(10000.0));
        assert_eq!(items[1].name.as_deref(), Some("north"));
    }

    #[test]
    fn orientation_keeps_null_group_community_does_not() {
        let houses = [house(None, None, None), house(Some("east"), Some("Lakeside"), None)];
        let refs: Vec<&House> = houses.iter().collect();
        assert_eq!(group_by(Dimension::Orientation, &refs).len(), 2);
        let community = group_by(Dimension::Community, &refs);
        assert_eq!(community.len(), 1);
        assert!(community[0].avg.is_none());
    }

    #[test]
    fn community_is_limited() {
        let houses: Vec<House> = (0..150)
            .map(|i| house(None, Some(&format!("c{i}")), None))
            .collect();
        let refs: Vec<&House> = houses.iter().collect();
        assert_eq!(compute(Dimension::Community, &refs).len(), COMMUNITY_LIMIT);
    }

    #[test]
    fn price_never_groups_by_raw_value() {
        let houses = [house(None, None, Some(9000.0)), house(None, None, Some(9500.0))];
        let refs: Vec<&House> = houses.iter().collect();
        assert!(group_by(Dimension::Price, &refs).is_empty());
        let items = compute(Dimension::Price, &refs);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name.as_deref(), Some("8K-1.2W"));
    }

    #[test]
    fn unknown_segment_is_rejected() {
        assert_eq!(Dimension::from_segment("house_type"), Some(Dimension::HouseType));
        assert_eq!(Dimension::from_segment("decoration"), None);
    }
}
