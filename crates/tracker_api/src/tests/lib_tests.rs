use super::*;

use anyhow::anyhow;
use async_trait::async_trait;
use shared::domain::ShopStatus;
use storage::InMemorySessionStore;

enum StubLookup {
    Found(ResolvedLocation),
    NotFound,
    Failing,
}

struct StubGeocoder {
    lookup: StubLookup,
}

#[async_trait]
impl GeocodingGateway for StubGeocoder {
    async fn resolve(&self, _query: &str) -> anyhow::Result<Option<ResolvedLocation>> {
        match &self.lookup {
            StubLookup::Found(location) => Ok(Some(location.clone())),
            StubLookup::NotFound => Ok(None),
            StubLookup::Failing => Err(anyhow!("connection refused")),
        }
    }
}

fn setup(lookup: StubLookup) -> ApiContext {
    ApiContext {
        store: Arc::new(InMemorySessionStore::new()),
        geocoder: Arc::new(StubGeocoder { lookup }),
    }
}

fn record(name: &str, lat: f64, lon: f64, status: ShopStatus) -> CoffeeShopRecord {
    CoffeeShopRecord {
        name: name.to_string(),
        lat,
        lon,
        status,
        review: None,
        pics: Vec::new(),
    }
}

#[tokio::test]
async fn list_is_empty_before_any_add() {
    let ctx = setup(StubLookup::NotFound);
    assert!(list_shops(&ctx).await.expect("list").is_empty());
}

#[tokio::test]
async fn every_add_lands_in_the_table() {
    let ctx = setup(StubLookup::NotFound);
    add_shop(&ctx, record("Cafe A", 43.65, -79.38, ShopStatus::Wishlist))
        .await
        .expect("add");
    add_shop(&ctx, record("Cafe B", 43.66, -79.40, ShopStatus::Sipped))
        .await
        .expect("add");
    let shops = list_shops(&ctx).await.expect("list");
    assert_eq!(shops.len(), 2);
    assert_eq!(shops[0].name, "Cafe A");
    assert_eq!(shops[1].name, "Cafe B");
}

#[tokio::test]
async fn empty_name_is_accepted_silently() {
    let ctx = setup(StubLookup::NotFound);
    add_shop(&ctx, record("", 200.0, -400.0, ShopStatus::Wishlist))
        .await
        .expect("add");
    assert_eq!(list_shops(&ctx).await.expect("list").len(), 1);
}

#[tokio::test]
async fn lookup_returns_the_resolved_location() {
    let ctx = setup(StubLookup::Found(ResolvedLocation {
        lat: 43.65,
        lon: -79.38,
        display_name: "Toronto, Canada".into(),
    }));
    let location = lookup_address(&ctx, "toronto").await.expect("lookup");
    assert_eq!(location.display_name, "Toronto, Canada");
}

#[tokio::test]
async fn lookup_miss_is_not_found() {
    let ctx = setup(StubLookup::NotFound);
    let err = lookup_address(&ctx, "nowhere at all")
        .await
        .expect_err("should miss");
    assert!(matches!(err.code, ErrorCode::NotFound));
}

#[tokio::test]
async fn lookup_transport_fault_is_upstream() {
    let ctx = setup(StubLookup::Failing);
    let err = lookup_address(&ctx, "toronto")
        .await
        .expect_err("should fail");
    assert!(matches!(err.code, ErrorCode::Upstream));
}
