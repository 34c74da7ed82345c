use shared::{domain::CoffeeShopRecord, protocol::ShopRow};

use super::escape_html;

/// Read-only table projecting name, status, and review. Empty body for
/// the empty table.
pub fn list_table(shops: &[CoffeeShopRecord]) -> String {
    let mut rows = String::new();
    for shop in shops {
        let row = ShopRow::from(shop);
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.name),
            row.status.as_str(),
            escape_html(row.review.as_deref().unwrap_or(""))
        ));
    }
    format!(
        concat!(
            "<table>\n",
            "<thead><tr><th>Name</th><th>Status</th><th>Review</th></tr></thead>\n",
            "<tbody>\n{}</tbody>\n",
            "</table>\n"
        ),
        rows
    )
}
