use std::fmt::Write as _;

use fastchow_cart::CartSnapshot;
use fastchow_checkout::{CheckoutSummary, LINE_DECIMALS, format_xlm};

use super::{escape, layout};

pub fn render(snapshot: &CartSnapshot) -> String {
    let badge = snapshot.total_items;

    if snapshot.is_empty() {
        let body = r#"<div class="card">
<p>Your cart is empty</p>
<a href="/">Browse Packages</a>
</div>"#;
        return layout("Cart", badge, body);
    }

    let mut rows = String::new();
    for item in &snapshot.items {
        let id = escape(item.product.id.as_str());
        let _ = write!(
            rows,
            r#"<div class="card">
<h3>{name}</h3>
<p>{price} XLM</p>
<form method="post" action="/cart/update">
<input type="hidden" name="product_id" value="{id}">
<input type="hidden" name="quantity" value="{less}">
<button type="submit" aria-label="Decrease quantity">-</button>
</form>
<span class="quantity">{quantity}</span>
<form method="post" action="/cart/update">
<input type="hidden" name="product_id" value="{id}">
<input type="hidden" name="quantity" value="{more}">
<button type="submit" aria-label="Increase quantity">+</button>
</form>
<p class="price">{subtotal}</p>
<form method="post" action="/cart/remove">
<input type="hidden" name="product_id" value="{id}">
<button type="submit" aria-label="Remove">Remove</button>
</form>
</div>"#,
            name = escape(item.product.name),
            price = item.product.price,
            quantity = item.quantity,
            less = i128::from(item.quantity) - 1,
            more = i128::from(item.quantity).saturating_add(1).min(i128::from(i64::MAX)),
            subtotal = format_xlm(item.line_total(), LINE_DECIMALS),
        );
    }

    let summary = CheckoutSummary::from_snapshot(snapshot);
    let body = format!(
        r#"<h1>Shopping Cart ({count} items)</h1>
<div>{rows}</div>
<form method="post" action="/cart/clear"><button type="submit">Clear Cart</button></form>
<div class="card">
<h2>Order Summary</h2>
<p>Subtotal: {subtotal}</p>
<p>Transaction Fee: {fee}</p>
<p><strong>Total: <span class="price">{total}</span></strong></p>
<a href="/order/confirm">Proceed to Checkout</a>
<a href="/">Continue Shopping</a>
</div>"#,
        count = snapshot.len(),
        subtotal = summary.formatted_subtotal(),
        fee = summary.formatted_fee(),
        total = summary.formatted_total(),
    );

    layout("Cart", badge, &body)
}
