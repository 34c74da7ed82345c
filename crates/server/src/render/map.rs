use shared::{
    domain::{CoffeeShopRecord, ShopStatus},
    protocol::{MapMarker, MapView},
};

use super::escape_html;

/// Fixed status-to-marker-color mapping.
pub fn status_color(status: ShopStatus) -> &'static str {
    match status {
        ShopStatus::Wishlist => "blue",
        ShopStatus::Sipped => "green",
    }
}

/// Compute the map view for the current table: center on the mean
/// coordinate, one marker per record. `None` for the empty table —
/// the caller must skip the map entirely in that case.
pub fn map_view(shops: &[CoffeeShopRecord], zoom: u32) -> Option<MapView> {
    if shops.is_empty() {
        return None;
    }
    let count = shops.len() as f64;
    let center_lat = shops.iter().map(|s| s.lat).sum::<f64>() / count;
    let center_lon = shops.iter().map(|s| s.lon).sum::<f64>() / count;
    let markers = shops
        .iter()
        .map(|shop| MapMarker {
            lat: shop.lat,
            lon: shop.lon,
            color: status_color(shop.status).to_string(),
            tooltip: shop.name.clone(),
            popup_html: popup_html(shop),
        })
        .collect();
    Some(MapView {
        center_lat,
        center_lon,
        zoom,
        markers,
    })
}

/// Popup body: bold name, status line, optional italic review, then
/// each photo inline as a `data:` image.
fn popup_html(shop: &CoffeeShopRecord) -> String {
    let mut html = format!(
        "<b>{}</b><br>Status: {}",
        escape_html(&shop.name),
        shop.status.as_str()
    );
    if let Some(review) = shop.review.as_deref() {
        if !review.is_empty() {
            html.push_str(&format!("<br><i>{}</i>", escape_html(review)));
        }
    }
    for pic in &shop.pics {
        let mime = pic.mime_type.as_deref().unwrap_or("image/png");
        html.push_str(&format!(
            "<br><img src=\"data:{mime};base64,{}\" width=\"150\">",
            pic.data_b64
        ));
    }
    html
}

/// The map section of the page: the tile container plus the view data
/// the Leaflet glue script consumes. `<` is escaped in the embedded
/// JSON so popup markup cannot terminate the script element.
pub fn map_section(view: &MapView) -> String {
    let view_json = serde_json::to_string(view)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c");
    format!(
        concat!(
            "<section>\n",
            "<h2>Coffee Shops Map</h2>\n",
            "<div id=\"map\" style=\"width: 700px; height: 500px;\"></div>\n",
            "<script>const MAP_VIEW = {};</script>\n",
            "</section>\n"
        ),
        view_json
    )
}

#[cfg(test)]
#[path = "tests/map_tests.rs"]
mod tests;
