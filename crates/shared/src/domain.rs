use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopStatus {
    Wishlist,
    Sipped,
}

impl ShopStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShopStatus::Wishlist => "wishlist",
            ShopStatus::Sipped => "sipped",
        }
    }
}

impl FromStr for ShopStatus {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "wishlist" => Ok(ShopStatus::Wishlist),
            "sipped" => Ok(ShopStatus::Sipped),
            _ => Err(()),
        }
    }
}

/// One uploaded photo, base64-encoded at submission time so it can be
/// embedded inline as a `data:` URL later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data_b64: String,
}

/// One logged coffee shop. Coordinates are always present; when a
/// lookup fails or is skipped they hold the submitted or default
/// values. Duplicates are allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoffeeShopRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub status: ShopStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(default)]
    pub pics: Vec<PhotoPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ShopStatus::Wishlist).expect("json"),
            "\"wishlist\""
        );
        assert_eq!(
            serde_json::to_string(&ShopStatus::Sipped).expect("json"),
            "\"sipped\""
        );
    }

    #[test]
    fn status_parses_both_values_and_rejects_others() {
        assert_eq!("wishlist".parse::<ShopStatus>(), Ok(ShopStatus::Wishlist));
        assert_eq!("sipped".parse::<ShopStatus>(), Ok(ShopStatus::Sipped));
        assert!("espresso".parse::<ShopStatus>().is_err());
    }

    #[test]
    fn record_round_trips_without_optional_fields() {
        let record = CoffeeShopRecord {
            name: "Cafe A".into(),
            lat: 43.65,
            lon: -79.38,
            status: ShopStatus::Wishlist,
            review: None,
            pics: Vec::new(),
        };
        let json = serde_json::to_string(&record).expect("json");
        assert!(!json.contains("review"));
        let back: CoffeeShopRecord = serde_json::from_str(&json).expect("parse");
        assert_eq!(back.name, "Cafe A");
        assert!(back.pics.is_empty());
    }
}
