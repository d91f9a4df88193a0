use serde::Serialize;
use uuid::Uuid;

use fastchow_core::SessionId;

/// Envelope for an event, containing session + stream metadata.
///
/// This is the unit published to subscribers.
///
/// Notes:
/// - **Session scoping**: `session_id` tells subscribers whose cart changed.
/// - `sequence_number` is the aggregate version right after the event was applied,
///   so it increases strictly within one session.
/// - `payload` is the domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    session_id: SessionId,

    aggregate_type: &'static str,
    event_type: &'static str,

    /// Monotonically increasing position in the session's stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        session_id: SessionId,
        aggregate_type: &'static str,
        event_type: &'static str,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            session_id,
            aggregate_type,
            event_type,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn aggregate_type(&self) -> &'static str {
        self.aggregate_type
    }

    pub fn event_type(&self) -> &'static str {
        self.event_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl<E: crate::Event> EventEnvelope<E> {
    /// Wrap an event, taking the type name from the event itself.
    pub fn wrap(
        session_id: SessionId,
        aggregate_type: &'static str,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self::new(
            Uuid::now_v7(),
            session_id,
            aggregate_type,
            payload.event_type(),
            sequence_number,
            payload,
        )
    }
}
