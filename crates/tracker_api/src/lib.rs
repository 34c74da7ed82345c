use std::sync::Arc;

use geocode::{GeocodingGateway, ResolvedLocation};
use shared::{
    domain::CoffeeShopRecord,
    error::{ApiError, ErrorCode},
};
use storage::SessionStore;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn SessionStore>,
    pub geocoder: Arc<dyn GeocodingGateway>,
}

/// Append one record to the session table. Accepts whatever the form
/// submitted: empty names and out-of-range coordinates go in as-is.
pub async fn add_shop(ctx: &ApiContext, record: CoffeeShopRecord) -> Result<(), ApiError> {
    let name = record.name.clone();
    let pics = record.pics.len();
    ctx.store.append(record).await.map_err(internal)?;
    info!(%name, pics, "added coffee shop");
    Ok(())
}

/// The full session table in insertion order.
pub async fn list_shops(ctx: &ApiContext) -> Result<Vec<CoffeeShopRecord>, ApiError> {
    ctx.store.all().await.map_err(internal)
}

/// Resolve a free-text address through the external geocoder. A miss
/// is `NotFound`; a provider or transport fault is `Upstream`.
pub async fn lookup_address(ctx: &ApiContext, query: &str) -> Result<ResolvedLocation, ApiError> {
    let location = ctx.geocoder.resolve(query).await.map_err(|error| {
        warn!(%query, %error, "geocoding lookup failed");
        ApiError::new(ErrorCode::Upstream, error.to_string())
    })?;
    location.ok_or_else(|| ApiError::new(ErrorCode::NotFound, "address not found"))
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
