//! Server-rendered HTML.
//!
//! Pages are plain strings assembled with `format!`. Every dynamic value goes
//! through [`escape`] before it is interpolated.

use std::fmt::Write as _;

use fastchow_catalog::{Category, Catalog, Product};

pub mod cart;
pub mod category;
pub mod checkout;
pub mod home;
pub mod notice;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;color:#111}\
header{display:flex;justify-content:space-between;align-items:center;padding:1rem 2rem;border-bottom:1px solid #eee}\
header nav a{margin-right:1rem}\
main{padding:2rem}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:1.5rem}\
.card{border:1px solid #e5e5e5;border-radius:8px;padding:1rem}\
.price{color:#7c3aed;font-weight:600}\
.badge{background:#7c3aed;color:#fff;border-radius:999px;padding:0 .5rem;margin-left:.25rem}\
.notice{background:#f5f3ff;border:1px solid #ddd6fe;padding:1rem;border-radius:8px}";

/// Minimal HTML escaping for text and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page: header with the cart badge, then `body`.
///
/// The badge subscribes to `/api/cart/stream` so it follows changes made in
/// other tabs.
pub fn layout(title: &str, cart_badge: u128, body: &str) -> String {
    let mut nav = String::new();
    for category in Category::ALL {
        let info = Catalog::standard().info(category);
        let _ = write!(
            nav,
            r#"<a href="/category/{key}">{title}</a>"#,
            key = category.as_str(),
            title = escape(info.title),
        );
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | FastChow</title>
<style>{STYLE}</style>
</head>
<body>
<header>
<a href="/"><strong>FastChow</strong></a>
<nav>{nav}</nav>
<a href="/cart" id="cart-link">Cart<span class="badge" id="cart-badge">{cart_badge}</span></a>
</header>
<main>
{body}
</main>
<script>
if (window.EventSource) {{
  new EventSource("/api/cart/stream").addEventListener("cart.changed", function (e) {{
    var cart = JSON.parse(e.data).cart;
    if (cart) document.getElementById("cart-badge").textContent = cart.total_items;
  }});
}}
</script>
</body>
</html>"#,
        title = escape(title),
    )
}

/// Product card with an "Add to Cart" form that redirects back to `return_to`.
pub fn product_card(product: &Product, return_to: &str) -> String {
    let items: String = product
        .items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();

    format!(
        r#"<div class="card">
<h3>{name}</h3>
<p>{description}</p>
<ul>{items}</ul>
<p class="price">{price} XLM</p>
<form method="post" action="/cart/add">
<input type="hidden" name="product_id" value="{id}">
<input type="hidden" name="quantity" value="1">
<input type="hidden" name="return_to" value="{return_to}">
<button type="submit">Add to Cart</button>
</form>
</div>"#,
        name = escape(product.name),
        description = escape(product.description),
        price = product.price,
        id = escape(product.id.as_str()),
        return_to = escape(return_to),
    )
}

pub fn product_grid<'a>(products: impl IntoIterator<Item = &'a Product>, return_to: &str) -> String {
    let cards: String = products
        .into_iter()
        .map(|p| product_card(p, return_to))
        .collect();
    format!(r#"<div class="grid">{cards}</div>"#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn layout_shows_badge_and_category_links() {
        let html = layout("Home", 7, "<p>hi</p>");
        assert!(html.contains(r#"<span class="badge" id="cart-badge">7</span>"#));
        assert!(html.contains(r#"href="/category/budget""#));
        assert!(html.contains("<title>Home | FastChow</title>"));
    }

    #[test]
    fn product_card_posts_to_cart() {
        let product = Catalog::standard().find("budget-b").unwrap();
        let html = product_card(product, "/category/budget");
        assert!(html.contains("Energy Boost Package"));
        assert!(html.contains("200 XLM"));
        assert!(html.contains(r#"name="product_id" value="budget-b""#));
        assert!(html.contains(r#"name="return_to" value="/category/budget""#));
    }
}
