use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    response::{Html, IntoResponse, Response},
};

use fastchow_catalog::CategoryPage;

use crate::app::services::StorefrontServices;
use crate::app::{errors, views};
use crate::context::SessionContext;

pub async fn home(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
) -> Html<String> {
    let badge = session.session().snapshot().total_items;
    Html(views::home::render(&services.catalog, badge))
}

pub async fn category(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
    Path(key): Path<String>,
) -> Response {
    let badge = session.session().snapshot().total_items;

    match services.catalog.resolve_category_page(&key) {
        CategoryPage::Found { info, products } => {
            Html(views::category::render(info, &products, badge)).into_response()
        }
        CategoryPage::NotFound { key } => {
            tracing::debug!(key = %key, "unknown category requested");
            errors::not_found_page(
                badge,
                "Category Not Found",
                "The category you're looking for doesn't exist.",
            )
        }
    }
}
