//! Catalog domain module.
//!
//! Snack packages and their categories, declared as static data. Lookups are pure
//! functions over that data (no IO, no HTTP).

pub mod catalog;
pub mod product;

pub use catalog::{ByCategory, CATEGORIES, Catalog, CategoryPage, PRODUCTS};
pub use product::{Category, CategoryInfo, Product};
