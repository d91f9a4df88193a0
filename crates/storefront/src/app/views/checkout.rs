use std::fmt::Write as _;

use fastchow_checkout::CheckoutSummary;

use super::{escape, layout};

pub fn render(
    summary: &CheckoutSummary,
    supported_wallets: &[&str],
    cart_badge: u128,
    notice: Option<&str>,
) -> String {
    let mut lines = String::new();
    for line in &summary.lines {
        let _ = write!(
            lines,
            r#"<div><p>{name}</p><p>Qty: {quantity}</p><p class="price">{subtotal}</p></div>"#,
            name = escape(line.name),
            quantity = line.quantity,
            subtotal = line.formatted_subtotal(),
        );
    }

    let notice = notice
        .map(|n| format!(r#"<div class="notice" role="alert">{}</div>"#, escape(n)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Checkout</h1>
{notice}
<div class="card">
<h2>Order Summary</h2>
{lines}
<p>Subtotal: {subtotal}</p>
<p>Transaction Fee: {fee}</p>
<p><strong>Total: <span class="price">{total}</span></strong></p>
</div>
<div class="card">
<h2>Payment Method</h2>
<p><strong>Stellar Wallet</strong></p>
<p>Connect your Stellar wallet to complete the payment. Supported wallets: {wallets}.</p>
<form method="post" action="/wallet/connect"><button type="submit">Connect Wallet</button></form>
<p><small>By completing this purchase, you agree to our Terms of Service and Privacy Policy.</small></p>
</div>
<form method="post" action="/order/confirm"><button type="submit">Confirm Payment</button></form>
<a href="/cart">Back to Cart</a>"#,
        subtotal = summary.formatted_subtotal(),
        fee = summary.formatted_fee(),
        total = summary.formatted_total(),
        wallets = escape(&supported_wallets.join(", ")),
    );

    layout("Checkout", cart_badge, &body)
}
