//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus distributes change notifications from a state container to every view
//! that displays it. It makes minimal assumptions:
//!
//! - **Transport-agnostic**: in-memory channels today; nothing in the trait ties
//!   it to one process.
//! - **Broadcast**: each subscriber gets a copy of every message published after it
//!   subscribed.
//! - **No persistence**: the cart is the source of truth; a subscriber that missed
//!   messages re-reads a snapshot.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
///
/// loop {
///     match subscription.recv_timeout(Duration::from_secs(1)) {
///         Ok(envelope) => redraw(envelope)?,
///         Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
///         Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
///     }
/// }
/// ```
///
/// Messages arrive in publish order. A subscription is meant to be drained by one
/// consumer.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain every message that is already queued.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ```text
/// Cart mutation → apply events → Event Bus (publish) → Subscribers
///                                                        ├─ page badges
///                                                        └─ SSE streams
/// ```
///
/// `publish()` can fail (e.g. lock poisoning); callers log the failure and carry
/// on, because the state change already happened and readers can re-read it.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;
}

/// A bus that hands out in-process [`Subscription`]s.
///
/// Forward-only buses (e.g. onto an async channel) implement [`EventBus`] alone.
pub trait Subscribe<M> {
    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }
}

impl<M, B> Subscribe<M> for Arc<B>
where
    B: Subscribe<M> + ?Sized,
{
    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
