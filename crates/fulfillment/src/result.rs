//! Engine output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroute_core::{BatchId, FailureKind, FulfillmentError, OrderId, ProductId};
use stockroute_inventory::ShipmentAllocation;

/// Shipments that together fulfill one order exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentPlan {
    pub order_id: OrderId,
    pub shipments: Vec<ShipmentAllocation>,
}

impl FulfillmentPlan {
    pub fn new(order_id: OrderId, shipments: Vec<ShipmentAllocation>) -> Self {
        Self { order_id, shipments }
    }

    /// Units of `product_id` shipped across all warehouses.
    pub fn shipped(&self, product_id: &ProductId) -> u64 {
        self.shipments.iter().map(|s| s.quantity_of(product_id)).sum()
    }

    pub fn total_units(&self) -> u64 {
        self.shipments.iter().map(ShipmentAllocation::total_units).sum()
    }

    pub fn is_single_shipment(&self) -> bool {
        self.shipments.len() == 1
    }
}

/// Why one order was not fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFailure {
    pub order_id: OrderId,
    pub kind: FailureKind,
    pub reason: String,
}

impl OrderFailure {
    pub fn new(order_id: OrderId, error: &FulfillmentError) -> Self {
        Self {
            order_id,
            kind: error.kind(),
            reason: error.to_string(),
        }
    }
}

/// Engine phase in which a fault was observed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Admission,
    Allocation,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Phase::Admission => f.write_str("admission"),
            Phase::Allocation => f.write_str("allocation"),
        }
    }
}

/// A non-business fault captured while processing one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnexpectedFault {
    pub order_id: OrderId,
    pub phase: Phase,
    pub message: String,
}

/// Outcome of one batch.
///
/// Every submitted order is in exactly one of `plans` or `failures`.
/// `unexpected` repeats, for operators, the failures that were faults rather
/// than business outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentResult {
    pub batch_id: BatchId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub plans: Vec<FulfillmentPlan>,
    pub failures: Vec<OrderFailure>,
    pub unexpected: Vec<UnexpectedFault>,
}

impl FulfillmentResult {
    pub fn has_unexpected_errors(&self) -> bool {
        !self.unexpected.is_empty()
    }

    pub fn plan_for(&self, order_id: OrderId) -> Option<&FulfillmentPlan> {
        self.plans.iter().find(|p| p.order_id == order_id)
    }

    pub fn failure_for(&self, order_id: OrderId) -> Option<&OrderFailure> {
        self.failures.iter().find(|f| f.order_id == order_id)
    }

    pub fn order_count(&self) -> usize {
        self.plans.len() + self.failures.len()
    }

    /// Units removed from stock by this batch.
    pub fn shipped_units(&self) -> u128 {
        self.plans.iter().map(|p| p.total_units() as u128).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroute_inventory::StockLine;

    #[test]
    fn plan_totals_sum_over_shipments() {
        let plan = FulfillmentPlan::new(
            OrderId::new(1),
            vec![
                ShipmentAllocation::new("W1", vec![StockLine::new("laptop", 5)]),
                ShipmentAllocation::new("W2", vec![StockLine::new("laptop", 1), StockLine::new("mouse", 2)]),
            ],
        );
        assert_eq!(plan.shipped(&ProductId::new("laptop")), 6);
        assert_eq!(plan.total_units(), 8);
        assert!(!plan.is_single_shipment());
    }

    #[test]
    fn failure_keeps_kind_and_message() {
        let failure = OrderFailure::new(OrderId::new(9), &FulfillmentError::invalid_order("order has no items"));
        assert_eq!(failure.kind, FailureKind::InvalidOrder);
        assert_eq!(failure.reason, "invalid order: order has no items");
    }
}
