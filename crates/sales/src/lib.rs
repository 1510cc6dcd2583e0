//! Sales orders as submitted to the fulfillment engine.
//!
//! Orders are plain input values: they are never mutated after submission and
//! carry no validation of their own (that is the validator's job).

pub mod order;

pub use order::{Order, OrderLine};
