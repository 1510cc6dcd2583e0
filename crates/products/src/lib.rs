//! Product catalog module.
//!
//! Catalog construction assigns product ids from an injected, thread-safe
//! generator (no process-wide counters). The fulfillment engine only reads the
//! resulting catalog to reject unknown product keys.

pub mod catalog;
pub mod id_generator;
pub mod product;

pub use catalog::Catalog;
pub use id_generator::ProductIdGenerator;
pub use product::{Product, ProductCategory};
