use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::sse::{Event as SseEvent, Sse},
};

use crate::app::realtime;
use crate::app::services::StorefrontServices;
use crate::context::SessionContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn stream(
    Extension(services): Extension<Arc<StorefrontServices>>,
    Extension(session): Extension<SessionContext>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, std::convert::Infallible>>> {
    realtime::cart_sse_stream(
        services.realtime_tx(),
        Arc::clone(session.session()),
        services.sse_keep_alive,
    )
}
