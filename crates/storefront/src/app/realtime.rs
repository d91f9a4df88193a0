//! Change notifications for live views.
//!
//! Each cart session publishes through a [`SessionBus`] onto one tokio
//! broadcast channel shared by every SSE stream; streams keep only their own
//! session's messages.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::{
    Stream, StreamExt,
    wrappers::{BroadcastStream, errors::BroadcastStreamRecvError},
};

use fastchow_cart::CartEnvelope;
use fastchow_core::SessionId;
use fastchow_events::EventBus;

use crate::app::dto;
use crate::app::sessions::StorefrontSession;

/// SSE event name sent after every cart change.
pub const CART_CHANGED: &str = "cart.changed";

/// `change` value of a `cart.changed` event sent after the stream lagged.
pub const CART_RESYNC: &str = "cart.resync";

/// Broadcast channel capacity. A stream that falls further behind than this
/// gets a resync snapshot in place of the messages it missed.
pub const REALTIME_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Serialize)]
pub struct RealtimeMessage {
    pub session_id: SessionId,
    pub topic: &'static str,
    pub sequence_number: u64,
    pub payload: serde_json::Value,
}

impl RealtimeMessage {
    fn from_envelope(envelope: &CartEnvelope) -> Self {
        Self {
            session_id: envelope.session_id(),
            topic: envelope.event_type(),
            sequence_number: envelope.sequence_number(),
            payload: serde_json::to_value(envelope.payload()).unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Per-session bus: forwards every envelope onto the shared broadcast channel.
#[derive(Debug, Clone)]
pub struct SessionBus {
    realtime_tx: broadcast::Sender<RealtimeMessage>,
}

impl SessionBus {
    pub fn new(realtime_tx: broadcast::Sender<RealtimeMessage>) -> Self {
        Self { realtime_tx }
    }
}

impl EventBus<CartEnvelope> for SessionBus {
    type Error = Infallible;

    fn publish(&self, envelope: CartEnvelope) -> Result<(), Self::Error> {
        // No SSE listeners is normal; send only fails when nobody is subscribed.
        let _ = self.realtime_tx.send(RealtimeMessage::from_envelope(&envelope));
        Ok(())
    }
}

/// Body of one `cart.changed` SSE event.
#[derive(Debug, Serialize)]
pub struct CartChange {
    pub change: &'static str,
    pub sequence_number: u64,
    pub event: serde_json::Value,
    pub cart: dto::CartResponse,
}

/// One session's changes, read from the shared broadcast channel.
///
/// The cart is read when the change is delivered. After a lag the missed
/// messages are replaced by a single [`CART_RESYNC`] change carrying the
/// current cart, so a dropped message never leaves a view stale.
pub fn cart_changes(
    rx: broadcast::Receiver<RealtimeMessage>,
    session: Arc<StorefrontSession>,
) -> impl Stream<Item = CartChange> + use<> {
    let session_id = session.id();

    BroadcastStream::new(rx).filter_map(move |msg| match msg {
        Ok(m) if m.session_id == session_id => Some(CartChange {
            change: m.topic,
            sequence_number: m.sequence_number,
            event: m.payload,
            cart: dto::CartResponse::from(&session.snapshot()),
        }),
        Ok(_) => None,
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::debug!(session_id = %session_id, skipped, "sse subscriber lagged; resyncing");
            let snapshot = session.snapshot();
            Some(CartChange {
                change: CART_RESYNC,
                sequence_number: snapshot.version,
                event: serde_json::Value::Null,
                cart: dto::CartResponse::from(&snapshot),
            })
        }
    })
}

/// SSE stream of `cart.changed` events for one session.
pub fn cart_sse_stream(
    realtime_tx: &broadcast::Sender<RealtimeMessage>,
    session: Arc<StorefrontSession>,
    keep_alive: Duration,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>> + use<>> {
    let stream = cart_changes(realtime_tx.subscribe(), session).map(|change| {
        let data = serde_json::to_string(&change).unwrap_or_else(|_| "{}".to_string());
        Ok(SseEvent::default().event(CART_CHANGED).data(data))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(keep_alive))
}
