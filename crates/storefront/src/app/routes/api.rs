use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use fastchow_catalog::CategoryPage;
use fastchow_checkout::CheckoutSummary;

use crate::app::services::StorefrontServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub async fn list_catalog(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Query(query): Query<dto::CatalogQuery>,
) -> Json<Vec<dto::ProductResponse>> {
    let products: Vec<_> = match query.category.as_deref() {
        Some(key) => services
            .catalog
            .filter_by_key(key)
            .map(dto::ProductResponse::from)
            .collect(),
        None => services
            .catalog
            .products()
            .iter()
            .map(dto::ProductResponse::from)
            .collect(),
    };
    Json(products)
}

pub async fn get_category(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Path(key): Path<String>,
) -> Response {
    match services.catalog.resolve_category_page(&key) {
        CategoryPage::Found { info, products } => {
            Json(dto::CategoryResponse::new(info, products)).into_response()
        }
        CategoryPage::NotFound { key } => errors::json_error(
            StatusCode::NOT_FOUND,
            "category_not_found",
            format!("no category with key '{key}'"),
        ),
    }
}

pub async fn get_cart(Extension(session): Extension<SessionContext>) -> Json<dto::CartResponse> {
    Json(dto::CartResponse::from(&session.session().snapshot()))
}

pub async fn add_item(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::AddItemRequest>,
) -> Response {
    let quantity = body.quantity.unwrap_or(1);
    if quantity == 0 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "quantity must be at least 1",
        );
    }

    let Some(product) = services.catalog.find(&body.product_id) else {
        return errors::product_not_found(&body.product_id);
    };

    let snapshot = session.session().add_item(product, quantity);
    Json(dto::CartResponse::from(&snapshot)).into_response()
}

/// `quantity <= 0` removes the line; unknown ids leave the cart unchanged.
pub async fn update_quantity(
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateQuantityRequest>,
) -> Json<dto::CartResponse> {
    let snapshot = session.session().update_quantity(&id, body.quantity);
    Json(dto::CartResponse::from(&snapshot))
}

pub async fn remove_item(
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> Json<dto::CartResponse> {
    let snapshot = session.session().remove_item(&id);
    Json(dto::CartResponse::from(&snapshot))
}

pub async fn clear_cart(Extension(session): Extension<SessionContext>) -> Json<dto::CartResponse> {
    Json(dto::CartResponse::from(&session.session().clear()))
}

pub async fn get_checkout(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
) -> Json<dto::CheckoutResponse> {
    let summary = CheckoutSummary::from_snapshot(&session.session().snapshot());
    Json(dto::CheckoutResponse::new(
        &summary,
        services.wallet.supported_wallets(),
    ))
}

pub async fn connect_wallet(Extension(services): Extension<Arc<StorefrontServices>>) -> Response {
    (StatusCode::ACCEPTED, Json(services.wallet.connect())).into_response()
}
