//! Inventory module: warehouses and the reservation committer.
//!
//! Warehouse stock is seeded once and afterwards written only through
//! [`reservation::commit`]. Everything else gets read access.

pub mod reservation;
pub mod warehouse;

pub use reservation::{commit, ShipmentAllocation, StockLine};
pub use warehouse::Warehouse;
