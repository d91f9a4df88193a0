//! Cart domain module.
//!
//! The cart is the only stateful piece of the storefront: an ordered list of
//! (product, quantity) lines with derived totals. `cart` holds the pure state
//! container; `session` wraps one cart per browser session behind a single writer
//! lock and publishes a change notification for every mutation.

pub mod cart;
pub mod session;

pub use cart::{
    AddItem, Cart, CartCleared, CartCommand, CartEvent, CartItem, ClearCart, ItemAdded,
    ItemRemoved, QuantityChanged, RemoveItem, UpdateQuantity,
};
pub use session::{CART_AGGREGATE_TYPE, CartEnvelope, CartSession, CartSnapshot};
