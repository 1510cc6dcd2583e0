//! Failure taxonomy for order fulfillment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::{ProductId, WarehouseId};

/// Result type used by the validation and allocation steps.
pub type FulfillmentOutcome<T> = Result<T, FulfillmentError>;

/// Coarse classification of why an order could not be fulfilled.
///
/// Everything except [`FailureKind::Unexpected`] is an ordinary business
/// outcome. `Unexpected` marks a fault (a bug or broken invariant) and is
/// escalated at batch level by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidOrder,
    UnknownProduct,
    NoFulfillmentPath,
    OutOfStock,
    WarehouseDoesNotExist,
    Unexpected,
}

impl FailureKind {
    pub fn is_business(self) -> bool {
        !matches!(self, FailureKind::Unexpected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::InvalidOrder => "invalid_order",
            FailureKind::UnknownProduct => "unknown_product",
            FailureKind::NoFulfillmentPath => "no_fulfillment_path",
            FailureKind::OutOfStock => "out_of_stock",
            FailureKind::WarehouseDoesNotExist => "warehouse_does_not_exist",
            FailureKind::Unexpected => "unexpected",
        }
    }
}

impl core::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-order failure.
///
/// Pure steps (validation, feasibility, planning, commit) return this as a
/// value; nothing in the fulfillment path signals expected conditions by
/// panicking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FulfillmentError {
    /// Structural defect in the order itself.
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    /// The order references a product the catalog does not know.
    #[error("unknown product '{0}'")]
    UnknownProduct(ProductId),

    /// No combination of warehouses can ship the product.
    #[error("no fulfillment path: {0}")]
    NoFulfillmentPath(String),

    /// Some stock exists, but not enough in total.
    #[error("out of stock: '{product_id}': need {requested}, have {available} total")]
    OutOfStock {
        product_id: ProductId,
        requested: u64,
        available: u64,
    },

    /// A warehouse-scoped operation named a warehouse that is not registered.
    #[error("warehouse '{0}' does not exist")]
    WarehouseDoesNotExist(WarehouseId),

    /// A fault that is not a business outcome (overflow, broken invariant, panic).
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl FulfillmentError {
    pub fn invalid_order(msg: impl Into<String>) -> Self {
        Self::InvalidOrder(msg.into())
    }

    pub fn no_fulfillment_path(msg: impl Into<String>) -> Self {
        Self::NoFulfillmentPath(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            FulfillmentError::InvalidOrder(_) => FailureKind::InvalidOrder,
            FulfillmentError::UnknownProduct(_) => FailureKind::UnknownProduct,
            FulfillmentError::NoFulfillmentPath(_) => FailureKind::NoFulfillmentPath,
            FulfillmentError::OutOfStock { .. } => FailureKind::OutOfStock,
            FulfillmentError::WarehouseDoesNotExist(_) => FailureKind::WarehouseDoesNotExist,
            FulfillmentError::Unexpected(_) => FailureKind::Unexpected,
        }
    }

    pub fn is_unexpected(&self) -> bool {
        self.kind() == FailureKind::Unexpected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_stock_message_names_totals() {
        let err = FulfillmentError::OutOfStock {
            product_id: ProductId::new("laptop"),
            requested: 99,
            available: 7,
        };
        assert_eq!(err.kind(), FailureKind::OutOfStock);
        assert!(err.to_string().contains("need 99, have 7 total"));
    }

    #[test]
    fn only_unexpected_is_not_a_business_failure() {
        assert!(FailureKind::InvalidOrder.is_business());
        assert!(FailureKind::WarehouseDoesNotExist.is_business());
        assert!(!FailureKind::Unexpected.is_business());
        assert!(FulfillmentError::unexpected("boom").is_unexpected());
    }

    #[test]
    fn failure_kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&FailureKind::NoFulfillmentPath).unwrap();
        assert_eq!(json, "\"no_fulfillment_path\"");
        assert_eq!(FailureKind::NoFulfillmentPath.to_string(), "no_fulfillment_path");
    }
}
