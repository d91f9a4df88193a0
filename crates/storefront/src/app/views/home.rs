use std::fmt::Write as _;

use fastchow_catalog::{Catalog, Category};

use super::{escape, layout, product_grid};

/// Products per category shown on the home page.
pub const FEATURED_PER_CATEGORY: usize = 2;

pub fn render(catalog: &Catalog, cart_badge: u128) -> String {
    let mut categories = String::new();
    for category in Category::ALL {
        let info = catalog.info(category);
        let highlights: String = catalog
            .filter_by_category(category)
            .take(FEATURED_PER_CATEGORY)
            .map(|p| format!("<li>{}</li>", escape(p.name)))
            .collect();

        let _ = write!(
            categories,
            r#"<div class="card">
<h3>{title}</h3>
<p>{description}</p>
<p class="price">{price_range}</p>
<ul>{highlights}</ul>
<a href="/category/{key}">View All</a>
</div>"#,
            title = escape(info.title),
            description = escape(info.description),
            price_range = escape(info.price_range),
            key = category.as_str(),
        );
    }

    let featured = product_grid(catalog.featured(FEATURED_PER_CATEGORY), "/");

    let body = format!(
        r#"<section>
<h1>Fast Snacks On Chain</h1>
<p>Order snacks, pay with crypto, delivered fast. Experience the future of food ordering on the Stellar blockchain.</p>
<a href="/category/budget">Browse Packages</a>
</section>
<section>
<h2>How It Works</h2>
<ol>
<li><strong>Browse Packages</strong>: choose from budget-friendly to bulk event packages</li>
<li><strong>Add to Cart</strong>: select your packages and review your order</li>
<li><strong>Pay &amp; Confirm</strong>: pay with XLM and get instant confirmation</li>
</ol>
</section>
<section>
<h2>Choose Your Category</h2>
<div class="grid">{categories}</div>
</section>
<section>
<h2>Popular Packages</h2>
{featured}
</section>"#
    );

    layout("Home", cart_badge, &body)
}
