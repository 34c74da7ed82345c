use shared::domain::CoffeeShopRecord;

use crate::config::MapDefaults;

use super::{
    escape_html,
    list::list_table,
    map::{map_section, map_view},
};

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Coffee Shop Tracker</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
body { font-family: sans-serif; max-width: 760px; margin: 1rem auto; }
form label { display: block; margin: 0.5rem 0; }
textarea { width: 100%; height: 4rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.5rem; text-align: left; }
.notice { margin: 0.5rem 0; }
.notice.success { color: #2e7d32; }
.notice.error { color: #c62828; }
</style>
</head>
<body>
<h1>&#9749; Coffee Shop Tracker</h1>
"#;

// Fills the coordinate inputs on success and leaves them untouched on
// a miss or a provider fault. The map block only runs when the page
// embedded a view for a non-empty table.
const PAGE_SCRIPT: &str = r#"<script>
async function lookupAddress() {
  const query = document.getElementById('address').value;
  const notice = document.getElementById('geocode-notice');
  if (!query) {
    return;
  }
  try {
    const response = await fetch('/api/geocode?q=' + encodeURIComponent(query));
    if (response.ok) {
      const location = await response.json();
      document.getElementById('lat').value = location.lat.toFixed(6);
      document.getElementById('lon').value = location.lon.toFixed(6);
      notice.textContent = 'Found: ' + location.display_name +
        ' (Lat: ' + location.lat.toFixed(5) + ', Lon: ' + location.lon.toFixed(5) + ')';
      notice.className = 'notice success';
    } else {
      notice.textContent = 'Address not found. Please try again.';
      notice.className = 'notice error';
    }
  } catch (err) {
    notice.textContent = 'Address lookup failed.';
    notice.className = 'notice error';
  }
}

if (typeof MAP_VIEW !== 'undefined' && MAP_VIEW) {
  const map = L.map('map').setView([MAP_VIEW.center_lat, MAP_VIEW.center_lon], MAP_VIEW.zoom);
  L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors'
  }).addTo(map);
  for (const marker of MAP_VIEW.markers) {
    L.circleMarker([marker.lat, marker.lon], {
      radius: 9,
      color: marker.color,
      fillColor: marker.color,
      fillOpacity: 0.7
    })
      .addTo(map)
      .bindTooltip(marker.tooltip)
      .bindPopup(marker.popup_html, { maxWidth: 300 });
  }
}
</script>
</body>
</html>
"#;

/// The whole interactive page, re-rendered from the full table on
/// every request.
pub fn page(shops: &[CoffeeShopRecord], defaults: MapDefaults, added: Option<&str>) -> String {
    let mut html = String::from(PAGE_HEAD);

    if let Some(name) = added {
        html.push_str(&format!(
            "<p class=\"notice success\">Added {}!</p>\n",
            escape_html(name)
        ));
    }

    html.push_str(&entry_form(defaults));

    match map_view(shops, defaults.zoom) {
        Some(view) => html.push_str(&map_section(&view)),
        None => html.push_str(
            concat!(
                "<section>\n",
                "<h2>Coffee Shops Map</h2>\n",
                "<p class=\"notice\">No coffee shops added yet. Add one above!</p>\n",
                "</section>\n"
            ),
        ),
    }

    html.push_str("<section>\n<h2>Coffee Shop List</h2>\n");
    html.push_str(&list_table(shops));
    html.push_str("</section>\n");

    html.push_str(PAGE_SCRIPT);
    html
}

fn entry_form(defaults: MapDefaults) -> String {
    format!(
        concat!(
            "<details open>\n",
            "<summary>Add a Coffee Shop</summary>\n",
            "<form action=\"/shops\" method=\"post\" enctype=\"multipart/form-data\">\n",
            "<label>Coffee Shop Name <input type=\"text\" name=\"name\"></label>\n",
            "<label>Search by address / place (optional) ",
            "<input type=\"text\" id=\"address\" name=\"address\"></label>\n",
            "<button type=\"button\" onclick=\"lookupAddress()\">Lookup Address</button>\n",
            "<p id=\"geocode-notice\" class=\"notice\"></p>\n",
            "<label>Latitude <input type=\"number\" id=\"lat\" name=\"lat\" ",
            "step=\"0.000001\" value=\"{}\"></label>\n",
            "<label>Longitude <input type=\"number\" id=\"lon\" name=\"lon\" ",
            "step=\"0.000001\" value=\"{}\"></label>\n",
            "<label>Status <select name=\"status\">",
            "<option value=\"wishlist\">wishlist</option>",
            "<option value=\"sipped\">sipped</option>",
            "</select></label>\n",
            "<label>Review (optional) <textarea name=\"review\"></textarea></label>\n",
            "<label>Upload photos <input type=\"file\" name=\"photos\" ",
            "accept=\"image/jpeg,image/png\" multiple></label>\n",
            "<button type=\"submit\">Add Coffee Shop</button>\n",
            "</form>\n",
            "</details>\n"
        ),
        defaults.lat, defaults.lon
    )
}
