use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{Html, IntoResponse, Redirect, Response},
};

use fastchow_checkout::CheckoutSummary;

use crate::app::services::StorefrontServices;
use crate::app::views;
use crate::context::SessionContext;

pub async fn show(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    render(&services, &session, None)
}

/// Hand the order to the wallet. The cart is left as is.
pub async fn confirm(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    let summary = CheckoutSummary::from_snapshot(&session.session().snapshot());
    if summary.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let outcome = services.wallet.confirm_payment(&summary);
    render(&services, &session, Some(outcome.notice()))
}

pub async fn connect_wallet(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    let outcome = services.wallet.connect();

    let snapshot = session.session().snapshot();
    if snapshot.is_empty() {
        return Html(views::notice::message(
            snapshot.total_items,
            "Connect Wallet",
            outcome.notice(),
        ))
        .into_response();
    }

    render(&services, &session, Some(outcome.notice()))
}

fn render(
    services: &StorefrontServices,
    session: &SessionContext,
    notice: Option<&str>,
) -> Response {
    let snapshot = session.session().snapshot();
    if snapshot.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    let summary = CheckoutSummary::from_snapshot(&snapshot);
    Html(views::checkout::render(
        &summary,
        services.wallet.supported_wallets(),
        snapshot.total_items,
        notice,
    ))
    .into_response()
}
