use super::{escape, layout};

pub fn not_found(cart_badge: u128, title: &str, message: &str) -> String {
    let body = format!(
        r#"<h1>{title}</h1>
<p>{message}</p>
<a href="/">Return to Home</a>"#,
        title = escape(title),
        message = escape(message),
    );
    layout(title, cart_badge, &body)
}

/// Standalone notice, used when there is no checkout to show it on.
pub fn message(cart_badge: u128, title: &str, message: &str) -> String {
    let body = format!(
        r#"<h1>{title}</h1>
<div class="notice" role="alert">{message}</div>
<a href="/cart">Back to Cart</a>"#,
        title = escape(title),
        message = escape(message),
    );
    layout(title, cart_badge, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_links_home() {
        let html = not_found(0, "Category Not Found", "The category you're looking for doesn't exist.");
        assert!(html.contains("<h1>Category Not Found</h1>"));
        assert!(html.contains("doesn&#39;t exist"));
        assert!(html.contains("Return to Home"));
    }

    #[test]
    fn message_is_an_alert() {
        let html = message(3, "Wallet", "pending");
        assert!(html.contains(r#"<div class="notice" role="alert">pending</div>"#));
    }
}
