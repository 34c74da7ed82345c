use serde::{Deserialize, Serialize};

use crate::domain::{CoffeeShopRecord, ShopStatus};

/// List-view projection: only the columns the table shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopRow {
    pub name: String,
    pub status: ShopStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

impl From<&CoffeeShopRecord> for ShopRow {
    fn from(record: &CoffeeShopRecord) -> Self {
        Self {
            name: record.name.clone(),
            status: record.status,
            review: record.review.clone(),
        }
    }
}

/// One map pin, ready for the tile layer: position, status color,
/// tooltip text, and the pre-rendered popup markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lon: f64,
    pub color: String,
    pub tooltip: String,
    pub popup_html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u32,
    pub markers: Vec<MapMarker>,
}
