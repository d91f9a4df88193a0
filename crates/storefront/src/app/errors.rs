use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde_json::json;

use crate::app::views;

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn product_not_found(product_id: &str) -> Response {
    json_error(
        StatusCode::NOT_FOUND,
        "product_not_found",
        format!("no package with id '{product_id}'"),
    )
}

/// 404 HTML page with a link back home.
pub fn not_found_page(cart_badge: u128, title: &str, message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(views::notice::not_found(cart_badge, title, message)),
    )
        .into_response()
}
