use std::sync::Arc;

use axum::{
    Form,
    extract::Extension,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::app::services::StorefrontServices;
use crate::app::{dto, errors, views};
use crate::context::SessionContext;

pub async fn show(Extension(session): Extension<SessionContext>) -> Html<String> {
    Html(views::cart::render(&session.session().snapshot()))
}

pub async fn add(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<dto::AddToCartForm>,
) -> Response {
    let session = session.session();

    let Some(product) = services.catalog.find(&form.product_id) else {
        return errors::not_found_page(
            session.snapshot().total_items,
            "Package Not Found",
            "The package you're trying to add doesn't exist.",
        );
    };

    session.add_item(product, form.quantity.unwrap_or(1));
    Redirect::to(safe_return_path(form.return_to.as_deref())).into_response()
}

pub async fn update(
    Extension(session): Extension<SessionContext>,
    Form(form): Form<dto::UpdateQuantityForm>,
) -> Redirect {
    session
        .session()
        .update_quantity(&form.product_id, form.quantity);
    Redirect::to("/cart")
}

pub async fn remove(
    Extension(session): Extension<SessionContext>,
    Form(form): Form<dto::RemoveItemForm>,
) -> Redirect {
    session.session().remove_item(&form.product_id);
    Redirect::to("/cart")
}

pub async fn clear(Extension(session): Extension<SessionContext>) -> Redirect {
    session.session().clear();
    Redirect::to("/cart")
}

/// Only same-site absolute paths are followed; anything else lands on the cart.
fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/cart",
    }
}
