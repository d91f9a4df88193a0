use std::time::Duration;

use fastchow_storefront::config::StorefrontConfig;
use reqwest::{StatusCode, header};
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = fastchow_storefront::app::build_app(&StorefrontConfig::default());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Open a session and return the `name=value` pair to send back.
async fn open_session(client: &reqwest::Client, srv: &TestServer) -> String {
    let res = client.get(srv.url("/api/cart")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("new session should set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn health_is_ok_without_session() {
    let srv = TestServer::spawn().await;
    let res = client().get(srv.url("/health")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn catalog_filters_by_category_key() {
    let srv = TestServer::spawn().await;
    let client = client();

    let all: serde_json::Value = client
        .get(srv.url("/api/catalog"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.as_array().unwrap().len(), 9);

    let budget: serde_json::Value = client
        .get(srv.url("/api/catalog?category=budget"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<_> = budget
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["budget-a", "budget-b", "budget-c"]);

    let unknown: serde_json::Value = client
        .get(srv.url("/api/catalog?category=unknown-category"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(unknown.as_array().unwrap().is_empty());

    let res = client
        .get(srv.url("/api/categories/unknown-category"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "category_not_found");
}

#[tokio::test]
async fn cart_lifecycle_add_update_remove() {
    let srv = TestServer::spawn().await;
    let client = client();
    let cookie = open_session(&client, &srv).await;

    // Add budget-a ×2
    let res = client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "budget-a", "quantity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
    let cart: serde_json::Value = res.json().await.unwrap();
    assert_eq!(cart["total_items"], 2);
    assert_eq!(cart["total_price"], "200");

    // Add one more (quantity defaults to 1)
    let cart: serde_json::Value = client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "budget-a" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 3);
    assert_eq!(cart["total_price"], "300");

    // Negative quantity removes the line
    let cart: serde_json::Value = client
        .put(srv.url("/api/cart/items/budget-a"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "quantity": -1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(cart["items"].as_array().unwrap().is_empty());
    assert_eq!(cart["total_price"], "0");

    // Removing an absent id is a no-op
    let res = client
        .delete(srv.url("/api/cart/items/budget-a"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let cart: serde_json::Value = res.json().await.unwrap();
    assert_eq!(cart["version"], 3);
}

#[tokio::test]
async fn invalid_additions_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = client();
    let cookie = open_session(&client, &srv).await;

    let res = client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "product_not_found");

    let res = client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "budget-a", "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn sessions_are_isolated() {
    let srv = TestServer::spawn().await;
    let client = client();
    let alice = open_session(&client, &srv).await;
    let bob = open_session(&client, &srv).await;
    assert_ne!(alice, bob);

    client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &alice)
        .json(&json!({ "product_id": "bulk-g" }))
        .send()
        .await
        .unwrap();

    let cart: serde_json::Value = client
        .get(srv.url("/api/cart"))
        .header(header::COOKIE, &bob)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["total_items"], 0);
}

#[tokio::test]
async fn checkout_summary_includes_fee() {
    let srv = TestServer::spawn().await;
    let client = client();
    let cookie = open_session(&client, &srv).await;

    client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "budget-a" }))
        .send()
        .await
        .unwrap();

    let summary: serde_json::Value = client
        .get(srv.url("/api/checkout"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["subtotal"], "100.00000 XLM");
    assert_eq!(summary["transaction_fee"], "0.00001 XLM");
    assert_eq!(summary["total"], "100.00001 XLM");
    assert_eq!(summary["lines"][0]["subtotal"], "100.00 XLM");
}

#[tokio::test]
async fn html_forms_drive_the_cart() {
    let srv = TestServer::spawn().await;
    let client = client();
    let cookie = open_session(&client, &srv).await;

    let res = client
        .post(srv.url("/cart/add"))
        .header(header::COOKIE, &cookie)
        .form(&[("product_id", "middle-d"), ("quantity", "2"), ("return_to", "/category/middle")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/category/middle");

    let html = client
        .get(srv.url("/cart"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Premium Snack Package"));
    assert!(html.contains("800.00 XLM"));
    assert!(html.contains(r#"id="cart-badge">2<"#));

    let res = client
        .post(srv.url("/cart/clear"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    // Empty cart cannot reach checkout.
    let res = client
        .get(srv.url("/order/confirm"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(res.headers()[header::LOCATION], "/cart");
}

#[tokio::test]
async fn unknown_category_page_is_not_found() {
    let srv = TestServer::spawn().await;
    let res = client()
        .get(srv.url("/category/unknown-category"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let html = res.text().await.unwrap();
    assert!(html.contains("Category Not Found"));
    assert!(html.contains("Return to Home"));
}

#[tokio::test]
async fn confirming_payment_leaves_cart_untouched() {
    let srv = TestServer::spawn().await;
    let client = client();
    let cookie = open_session(&client, &srv).await;

    client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "bulk-i" }))
        .send()
        .await
        .unwrap();

    let res = client
        .post(srv.url("/order/confirm"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("Wallet connection will be implemented with Stellar integration"));

    let cart: serde_json::Value = client
        .get(srv.url("/api/cart"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["total_items"], 1);
    assert_eq!(cart["version"], 1);
}

#[tokio::test]
async fn wallet_connect_is_pending() {
    let srv = TestServer::spawn().await;
    let client = client();
    let cookie = open_session(&client, &srv).await;
    let notice = "Wallet connection will be implemented with Stellar integration";

    let res = client
        .post(srv.url("/api/wallet/connect"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "pending");
    assert_eq!(body["notice"], notice);

    // Empty cart: standalone notice page.
    let res = client
        .post(srv.url("/wallet/connect"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains("Connect Wallet"));
    assert!(html.contains(notice));

    client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "budget-a" }))
        .send()
        .await
        .unwrap();

    // With items: the notice is shown on the checkout page.
    let res = client
        .post(srv.url("/wallet/connect"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = res.text().await.unwrap();
    assert!(html.contains(notice));
    assert!(html.contains("100.00001 XLM"));
}

#[tokio::test]
async fn large_quantities_total_exactly() {
    let srv = TestServer::spawn().await;
    let client = client();
    let cookie = open_session(&client, &srv).await;

    let cart: serde_json::Value = client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "bulk-i", "quantity": 2_000_000_000u64 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["total_items"], 2_000_000_000u64);
    assert_eq!(cart["total_price"], "30000000000000");

    let summary: serde_json::Value = client
        .get(srv.url("/api/checkout"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(summary["total"], "30000000000000.00001 XLM");
}

#[tokio::test]
async fn stream_pushes_cart_changes() {
    let srv = TestServer::spawn().await;
    let client = client();
    let cookie = open_session(&client, &srv).await;

    let mut stream = client
        .get(srv.url("/api/cart/stream"))
        .header(header::COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(stream.status(), StatusCode::OK);

    client
        .post(srv.url("/api/cart/items"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "product_id": "budget-c", "quantity": 4 }))
        .send()
        .await
        .unwrap();

    let mut received = String::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while !received.contains("\"total_items\":4") {
        let chunk = tokio::time::timeout_at(deadline, stream.chunk())
            .await
            .expect("no cart event within timeout")
            .unwrap()
            .expect("stream closed early");
        received.push_str(&String::from_utf8_lossy(&chunk));
    }

    assert!(received.contains("event: cart.changed"));
    assert!(received.contains("cart.item.added"));
}
