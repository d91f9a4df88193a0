use fastchow_catalog::{CategoryInfo, Product};

use super::{escape, layout, product_grid};

pub fn render(info: &CategoryInfo, products: &[&'static Product], cart_badge: u128) -> String {
    let count = products.len();
    let plural = if count == 1 { "" } else { "s" };
    let return_to = format!("/category/{}", info.category.as_str());

    let body = format!(
        r#"<nav><a href="/">Home</a> / Categories / <span>{title}</span></nav>
<h1>{title}</h1>
<p>{description}</p>
<p>Price Range: <span class="price">{price_range}</span></p>
<p>{count} package{plural} in this category</p>
{grid}"#,
        title = escape(info.title),
        description = escape(info.description),
        price_range = escape(info.price_range),
        grid = product_grid(products.iter().copied(), &return_to),
    );

    layout(info.title, cart_badge, &body)
}
