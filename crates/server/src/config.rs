use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub geocoder_base_url: String,
    pub geocoder_user_agent: String,
    pub default_lat: f64,
    pub default_lon: f64,
    pub map_zoom: u32,
}

/// Render-time defaults: initial form coordinates and map zoom.
#[derive(Debug, Clone, Copy)]
pub struct MapDefaults {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".into(),
            geocoder_base_url: "https://nominatim.openstreetmap.org/".into(),
            geocoder_user_agent: "coffee_app".into(),
            default_lat: 43.65,
            default_lon: -79.38,
            map_zoom: 13,
        }
    }
}

impl Settings {
    pub fn map_defaults(&self) -> MapDefaults {
        MapDefaults {
            lat: self.default_lat,
            lon: self.default_lon,
            zoom: self.map_zoom,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("tracker.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("TRACKER_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("TRACKER_GEOCODER_URL") {
        settings.geocoder_base_url = v;
    }
    if let Ok(v) = std::env::var("TRACKER_GEOCODER_USER_AGENT") {
        settings.geocoder_user_agent = v;
    }
    if let Ok(v) = std::env::var("TRACKER_DEFAULT_LAT") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.default_lat = parsed;
        }
    }
    if let Ok(v) = std::env::var("TRACKER_DEFAULT_LON") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.default_lon = parsed;
        }
    }
    if let Ok(v) = std::env::var("TRACKER_MAP_ZOOM") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.map_zoom = parsed;
        }
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.bind_addr = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("geocoder_base_url")
        .and_then(toml::Value::as_str)
    {
        settings.geocoder_base_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("geocoder_user_agent")
        .and_then(toml::Value::as_str)
    {
        settings.geocoder_user_agent = v.to_string();
    }
    if let Some(v) = file_cfg.get("default_lat").and_then(toml::Value::as_float) {
        settings.default_lat = v;
    }
    if let Some(v) = file_cfg.get("default_lon").and_then(toml::Value::as_float) {
        settings.default_lon = v;
    }
    if let Some(v) = file_cfg.get("map_zoom").and_then(toml::Value::as_integer) {
        settings.map_zoom = v as u32;
    }
}
