use super::*;

use shared::domain::ShopStatus;

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
async fn starts_empty() {
    let store = InMemorySessionStore::new();
    assert!(store.all().await.expect("all").is_empty());
}

#[tokio::test]
async fn append_count_matches_adds() {
    let store = InMemorySessionStore::new();
    for i in 0..5 {
        store
            .append(record(&format!("shop {i}"), 43.65, -79.38, ShopStatus::Wishlist))
            .await
            .expect("append");
    }
    assert_eq!(store.all().await.expect("all").len(), 5);
}

#[tokio::test]
async fn duplicates_are_allowed() {
    let store = InMemorySessionStore::new();
    let shop = record("Cafe A", 43.65, -79.38, ShopStatus::Sipped);
    store.append(shop.clone()).await.expect("append");
    store.append(shop).await.expect("append");
    let all = store.all().await.expect("all");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, all[1].name);
}

#[tokio::test]
async fn preserves_insertion_order() {
    let store = InMemorySessionStore::new();
    store
        .append(record("Cafe A", 43.65, -79.38, ShopStatus::Wishlist))
        .await
        .expect("append");
    store
        .append(record("Cafe B", 43.66, -79.40, ShopStatus::Sipped))
        .await
        .expect("append");
    let names: Vec<_> = store
        .all()
        .await
        .expect("all")
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Cafe A", "Cafe B"]);
}

#[tokio::test]
async fn clones_share_the_same_table() {
    let store = InMemorySessionStore::new();
    let other = store.clone();
    other
        .append(record("Cafe A", 43.65, -79.38, ShopStatus::Wishlist))
        .await
        .expect("append");
    assert_eq!(store.all().await.expect("all").len(), 1);
}
