use serde::{Deserialize, Serialize};

use fastchow_cart::{CartItem, CartSnapshot};
use fastchow_catalog::{CategoryInfo, Product};
use fastchow_checkout::{CheckoutSummary, SummaryLine};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

// HTML form bodies (application/x-www-form-urlencoded).

#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u64>,
    pub return_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityForm {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemForm {
    pub product_id: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Shortest exact XLM amount, e.g. `"100"`.
    pub price: String,
    pub price_stroops: u128,
    pub category: &'static str,
    pub items: &'static [&'static str],
    pub image: &'static str,
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.as_str(),
            name: p.name,
            description: p.description,
            price: p.price.to_string(),
            price_stroops: p.price.stroops(),
            category: p.category.as_str(),
            items: p.items,
            image: p.image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub price_range: &'static str,
    pub products: Vec<ProductResponse>,
}

impl CategoryResponse {
    pub fn new<'a>(info: &CategoryInfo, products: impl IntoIterator<Item = &'a Product>) -> Self {
        Self {
            key: info.category.as_str(),
            title: info.title,
            description: info.description,
            price_range: info.price_range,
            products: products.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub product: ProductResponse,
    pub quantity: u64,
    pub subtotal: String,
    pub subtotal_stroops: u128,
}

impl From<&CartItem> for CartLineResponse {
    fn from(item: &CartItem) -> Self {
        let subtotal = item.line_total();
        Self {
            product: ProductResponse::from(item.product),
            quantity: item.quantity,
            subtotal: subtotal.to_string(),
            subtotal_stroops: subtotal.stroops(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub session_id: String,
    pub version: u64,
    pub items: Vec<CartLineResponse>,
    pub total_items: u128,
    pub total_price: String,
    pub total_price_stroops: u128,
}

impl From<&CartSnapshot> for CartResponse {
    fn from(s: &CartSnapshot) -> Self {
        Self {
            session_id: s.session_id.to_string(),
            version: s.version,
            items: s.items.iter().map(CartLineResponse::from).collect(),
            total_items: s.total_items,
            total_price: s.total_price.to_string(),
            total_price_stroops: s.total_price.stroops(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckoutLineResponse {
    pub product_id: &'static str,
    pub name: &'static str,
    pub quantity: u64,
    /// Two decimals, e.g. `"200.00 XLM"`.
    pub subtotal: String,
}

impl From<&SummaryLine> for CheckoutLineResponse {
    fn from(line: &SummaryLine) -> Self {
        Self {
            product_id: line.product_id.as_str(),
            name: line.name,
            quantity: line.quantity,
            subtotal: line.formatted_subtotal(),
        }
    }
}

/// Checkout figures with display strings (five decimals).
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub cart_version: u64,
    pub lines: Vec<CheckoutLineResponse>,
    pub subtotal: String,
    pub transaction_fee: String,
    pub total: String,
    pub total_stroops: u128,
    pub supported_wallets: &'static [&'static str],
}

impl CheckoutResponse {
    pub fn new(summary: &CheckoutSummary, supported_wallets: &'static [&'static str]) -> Self {
        Self {
            cart_version: summary.cart_version,
            lines: summary.lines.iter().map(CheckoutLineResponse::from).collect(),
            subtotal: summary.formatted_subtotal(),
            transaction_fee: summary.formatted_fee(),
            total: summary.formatted_total(),
            total_stroops: summary.total.stroops(),
            supported_wallets,
        }
    }
}
