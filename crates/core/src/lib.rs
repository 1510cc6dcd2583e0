//! `stockroute-core`: shared building blocks for the fulfillment workspace.
//!
//! This crate contains **pure domain** primitives (identifiers and the failure
//! taxonomy). It has no knowledge of warehouses, orders or the engine.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{find_by_id, position_of, Entity};
pub use error::{FailureKind, FulfillmentError, FulfillmentOutcome};
pub use id::{BatchId, OrderId, ProductId, WarehouseId};
