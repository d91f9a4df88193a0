//! Events: the change-notification plumbing between state containers and views.
//!
//! - `event`: the [`Event`] trait (stable type names, versions, timestamps)
//! - `envelope`: per-session stream metadata around an event payload
//! - `bus` / `in_memory_bus`: pub/sub for subscribers that redraw on change
//! - `handler`: decide + apply helper for aggregates

pub mod bus;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscribe, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
