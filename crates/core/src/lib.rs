//! `fastchow-core`: domain building blocks shared by the storefront crates.
//!
//! This crate contains **pure domain** primitives (no HTTP, no storage).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, SessionId};
pub use money::{STROOPS_PER_XLM, Xlm};
pub use value_object::ValueObject;
