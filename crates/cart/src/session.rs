//! Per-session cart container.
//!
//! `CartSession` is the only way the storefront touches a cart: one mutex makes
//! it the single writer, readers get whole [`CartSnapshot`]s taken under the same
//! lock, and every applied event is published to the session's bus before the
//! lock is released, so subscribers observe changes in version order.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use fastchow_catalog::Product;
use fastchow_core::{AggregateRoot, SessionId, Xlm};
use fastchow_events::{EventBus, EventEnvelope, Subscribe, Subscription};

use crate::cart::{Cart, CartEvent, CartItem};

/// Aggregate type name carried on published envelopes.
pub const CART_AGGREGATE_TYPE: &str = "cart";

/// Envelope type published for cart changes.
pub type CartEnvelope = EventEnvelope<CartEvent>;

/// Consistent, owned view of a cart at one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub session_id: SessionId,
    pub version: u64,
    pub items: Vec<CartItem>,
    pub total_items: u128,
    pub total_price: Xlm,
}

impl CartSnapshot {
    fn of(cart: &Cart) -> Self {
        Self {
            session_id: cart.session_id(),
            version: cart.version(),
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn quantity_of(&self, product_id: &str) -> Option<u64> {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map(|item| item.quantity)
    }
}

/// One browser session's cart plus its change-notification bus.
#[derive(Debug)]
pub struct CartSession<B> {
    id: SessionId,
    cart: Mutex<Cart>,
    bus: B,
}

impl<B> CartSession<B>
where
    B: EventBus<CartEnvelope>,
{
    pub fn new(id: SessionId, bus: B) -> Self {
        Self {
            id,
            cart: Mutex::new(Cart::new(id)),
            bus,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::of(&self.lock())
    }

    pub fn add_item(&self, product: &'static Product, quantity: u64) -> CartSnapshot {
        self.mutate("add_item", |cart| cart.add_item(product, quantity))
    }

    pub fn update_quantity(&self, product_id: &str, quantity: i64) -> CartSnapshot {
        self.mutate("update_quantity", |cart| cart.update_quantity(product_id, quantity))
    }

    pub fn remove_item(&self, product_id: &str) -> CartSnapshot {
        self.mutate("remove_item", |cart| cart.remove_item(product_id))
    }

    pub fn clear(&self) -> CartSnapshot {
        self.mutate("clear", Cart::clear)
    }

    fn mutate(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Cart) -> Vec<CartEvent>,
    ) -> CartSnapshot {
        let mut cart = self.lock();
        let version_before = cart.version();
        let events = f(&mut *cart);

        if events.is_empty() {
            tracing::debug!(session_id = %self.id, operation, "cart unchanged");
            return CartSnapshot::of(&cart);
        }

        // Sequence numbers are the cart version right after each event.
        for (offset, event) in events.into_iter().enumerate() {
            let sequence_number = version_before + offset as u64 + 1;
            let envelope =
                CartEnvelope::wrap(self.id, CART_AGGREGATE_TYPE, sequence_number, event);
            if let Err(e) = self.bus.publish(envelope) {
                tracing::warn!(session_id = %self.id, error = ?e, "failed to publish cart event");
            }
        }

        let snapshot = CartSnapshot::of(&cart);
        tracing::debug!(
            session_id = %self.id,
            operation,
            version = snapshot.version,
            lines = snapshot.len(),
            total_items = snapshot.total_items,
            "cart updated"
        );
        snapshot
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        // Cart events are applied whole, so a panic elsewhere never leaves a torn cart.
        self.cart.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::warn!(session_id = %self.id, "cart lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl<B> CartSession<B>
where
    B: Subscribe<CartEnvelope>,
{
    /// Subscribe to every change applied after this call.
    pub fn subscribe(&self) -> Subscription<CartEnvelope> {
        self.bus.subscribe()
    }
}
