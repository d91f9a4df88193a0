use axum::{
    Router,
    routing::{get, post, put},
};

pub mod api;
pub mod cart;
pub mod checkout;
pub mod pages;
pub mod system;

/// Router for every session-scoped endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/category/:key", get(pages::category))
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/update", post(cart::update))
        .route("/cart/remove", post(cart::remove))
        .route("/cart/clear", post(cart::clear))
        .route("/order/confirm", get(checkout::show).post(checkout::confirm))
        .route("/wallet/connect", post(checkout::connect_wallet))
        .nest("/api", api_router())
}

fn api_router() -> Router {
    Router::new()
        .route("/catalog", get(api::list_catalog))
        .route("/categories/:key", get(api::get_category))
        .route("/cart", get(api::get_cart).delete(api::clear_cart))
        .route("/cart/items", post(api::add_item))
        .route(
            "/cart/items/:id",
            put(api::update_quantity).delete(api::remove_item),
        )
        .route("/cart/stream", get(system::stream))
        .route("/checkout", get(api::get_checkout))
        .route("/wallet/connect", post(api::connect_wallet))
}
