use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use url::Url;

/// A resolved free-text address: coordinates plus the provider's
/// normalized display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

/// Address lookup seam. `Ok(None)` means the provider had no match;
/// `Err` means the provider or the transport failed.
#[async_trait]
pub trait GeocodingGateway: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Option<ResolvedLocation>>;
}

/// One entry of a Nominatim search response. The provider serializes
/// coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

/// Pass-through adapter for the Nominatim search endpoint: one request
/// per lookup, no retry, no caching. Nominatim's usage policy requires
/// an identifying user agent on every request.
pub struct NominatimGeocoder {
    http: Client,
    search_url: Url,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: impl Into<String>) -> Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .with_context(|| format!("invalid geocoder base url '{base_url}'"))?;
        let search_url = base
            .join("search")
            .with_context(|| format!("cannot derive search url from '{base_url}'"))?;
        Ok(Self {
            http: Client::new(),
            search_url,
            user_agent: user_agent.into(),
        })
    }
}

#[async_trait]
impl GeocodingGateway for NominatimGeocoder {
    async fn resolve(&self, query: &str) -> Result<Option<ResolvedLocation>> {
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .context("geocoding request failed")?
            .error_for_status()
            .context("geocoding provider returned an error status")?;

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .context("geocoding response was not valid JSON")?;
        first_location(places)
    }
}

fn first_location(places: Vec<NominatimPlace>) -> Result<Option<ResolvedLocation>> {
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };
    let lat = place
        .lat
        .parse::<f64>()
        .with_context(|| format!("unparsable latitude '{}'", place.lat))?;
    let lon = place
        .lon
        .parse::<f64>()
        .with_context(|| format!("unparsable longitude '{}'", place.lon))?;
    Ok(Some(ResolvedLocation {
        lat,
        lon,
        display_name: place.display_name,
    }))
}
