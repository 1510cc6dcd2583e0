//! `stockroute-fulfillment`: assigns shared warehouse stock to batches of orders.
//!
//! Pipeline per batch:
//! 1. **Admission** (parallel, read-only): [`validator`] then [`feasibility`].
//! 2. **Allocation** (sequential, mutating): [`planner`] then the reservation
//!    committer from `stockroute-inventory`.
//!
//! [`FulfillmentEngine`] drives both phases and returns a [`FulfillmentResult`]
//! in which every submitted order appears exactly once.

pub mod config;
pub mod engine;
pub mod feasibility;
pub mod planner;
pub mod result;
pub mod validator;

pub use config::{AllocationOrder, ConfigError, EngineConfig, UnexpectedErrorPolicy};
pub use engine::{EngineError, FulfillmentEngine};
pub use result::{FulfillmentPlan, FulfillmentResult, OrderFailure, Phase, UnexpectedFault};
pub use validator::ValidatedOrder;

pub use stockroute_inventory::{ShipmentAllocation, StockLine};
