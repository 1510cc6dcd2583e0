//! Reservation committer: the single write path into warehouse stock.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroute_core::{position_of, Entity, FulfillmentError, FulfillmentOutcome, ProductId, WarehouseId};

use crate::warehouse::Warehouse;

/// Quantity of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    pub product_id: ProductId,
    pub quantity: u64,
}

impl StockLine {
    pub fn new(product_id: impl Into<ProductId>, quantity: u64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// What one warehouse ships for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentAllocation {
    pub warehouse_id: WarehouseId,
    pub items: Vec<StockLine>,
}

impl ShipmentAllocation {
    pub fn new(warehouse_id: impl Into<WarehouseId>, items: Vec<StockLine>) -> Self {
        Self {
            warehouse_id: warehouse_id.into(),
            items,
        }
    }

    /// Quantity of `product_id` in this shipment (zero if absent).
    pub fn quantity_of(&self, product_id: &ProductId) -> u64 {
        self.items
            .iter()
            .filter(|line| &line.product_id == product_id)
            .map(|line| line.quantity)
            .sum()
    }

    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

/// Subtract every shipment from live stock, all or nothing.
///
/// Every warehouse id is resolved and every quantity is checked against current
/// stock before anything is written. On error no warehouse has changed.
pub fn commit(warehouses: &mut [Warehouse], shipments: &[ShipmentAllocation]) -> FulfillmentOutcome<()> {
    let mut demand: BTreeMap<(usize, &ProductId), u64> = BTreeMap::new();

    for shipment in shipments {
        let idx = position_of(warehouses, &shipment.warehouse_id)
            .ok_or_else(|| FulfillmentError::WarehouseDoesNotExist(shipment.warehouse_id.clone()))?;

        for line in &shipment.items {
            let slot = demand.entry((idx, &line.product_id)).or_insert(0);
            *slot = slot.checked_add(line.quantity).ok_or_else(|| {
                FulfillmentError::unexpected(format!(
                    "reservation quantity overflow for '{}'",
                    line.product_id
                ))
            })?;
        }
    }

    for (&(idx, product_id), &quantity) in &demand {
        let warehouse = &warehouses[idx];
        let available = warehouse.available(product_id);
        if available < quantity {
            return Err(FulfillmentError::unexpected(format!(
                "reserving {quantity} of '{product_id}' at '{}' exceeds available {available}",
                warehouse.id()
            )));
        }
    }

    for ((idx, product_id), quantity) in demand {
        warehouses[idx].deduct(product_id, quantity);
        tracing::trace!(
            warehouse_id = %warehouses[idx].id(),
            product_id = %product_id,
            quantity,
            "stock reserved"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroute_core::FailureKind;

    fn warehouses() -> Vec<Warehouse> {
        vec![
            Warehouse::new("W1").with_stock("laptop", 5).with_stock("mouse", 20),
            Warehouse::new("W2").with_stock("laptop", 2).with_stock("keyboard", 10),
        ]
    }

    #[test]
    fn commit_decrements_each_listed_quantity() {
        let mut ws = warehouses();
        let shipments = vec![
            ShipmentAllocation::new("W1", vec![StockLine::new("laptop", 5)]),
            ShipmentAllocation::new("W2", vec![StockLine::new("laptop", 1), StockLine::new("keyboard", 3)]),
        ];

        commit(&mut ws, &shipments).unwrap();

        assert_eq!(ws[0].available(&ProductId::new("laptop")), 0);
        assert_eq!(ws[0].available(&ProductId::new("mouse")), 20);
        assert_eq!(ws[1].available(&ProductId::new("laptop")), 1);
        assert_eq!(ws[1].available(&ProductId::new("keyboard")), 7);
    }

    #[test]
    fn unknown_warehouse_fails_without_touching_stock() {
        let mut ws = warehouses();
        let before = ws.clone();
        let shipments = vec![
            ShipmentAllocation::new("W1", vec![StockLine::new("laptop", 1)]),
            ShipmentAllocation::new("W3", vec![StockLine::new("laptop", 1)]),
        ];

        let err = commit(&mut ws, &shipments).unwrap_err();
        assert_eq!(err.kind(), FailureKind::WarehouseDoesNotExist);
        assert_eq!(ws, before);
    }

    #[test]
    fn shortfall_is_unexpected_and_leaves_stock_untouched() {
        let mut ws = warehouses();
        let before = ws.clone();
        let shipments = vec![
            ShipmentAllocation::new("W1", vec![StockLine::new("mouse", 2)]),
            ShipmentAllocation::new("W2", vec![StockLine::new("mouse", 1)]),
        ];

        let err = commit(&mut ws, &shipments).unwrap_err();
        assert!(err.is_unexpected());
        assert_eq!(ws, before);
    }

    #[test]
    fn repeated_warehouse_entries_are_checked_together() {
        let mut ws = warehouses();
        let before = ws.clone();
        let shipments = vec![
            ShipmentAllocation::new("W2", vec![StockLine::new("laptop", 2)]),
            ShipmentAllocation::new("W2", vec![StockLine::new("laptop", 1)]),
        ];

        assert!(commit(&mut ws, &shipments).is_err());
        assert_eq!(ws, before);
    }

    #[test]
    fn shipment_helpers_sum_quantities() {
        let shipment = ShipmentAllocation::new(
            "W1",
            vec![StockLine::new("laptop", 2), StockLine::new("mouse", 3)],
        );
        assert_eq!(shipment.quantity_of(&ProductId::new("mouse")), 3);
        assert_eq!(shipment.quantity_of(&ProductId::new("keyboard")), 0);
        assert_eq!(shipment.total_units(), 5);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: a commit either removes exactly the requested units or changes nothing.
            #[test]
            fn commit_is_all_or_nothing(
                stock in prop::collection::vec(0u64..50, 3),
                takes in prop::collection::vec((0usize..3, 1u64..30), 1..6)
            ) {
                let mut ws: Vec<Warehouse> = stock
                    .iter()
                    .enumerate()
                    .map(|(i, &q)| Warehouse::new(format!("W{i}")).with_stock("sku", q))
                    .collect();
                let before = ws.clone();
                let total_before: u128 = ws.iter().map(Warehouse::total_units).sum();

                let shipments: Vec<ShipmentAllocation> = takes
                    .iter()
                    .map(|&(i, q)| ShipmentAllocation::new(format!("W{i}"), vec![StockLine::new("sku", q)]))
                    .collect();
                let requested: u128 = takes.iter().map(|&(_, q)| q as u128).sum();

                match commit(&mut ws, &shipments) {
                    Ok(()) => {
                        let total_after: u128 = ws.iter().map(Warehouse::total_units).sum();
                        prop_assert_eq!(total_after, total_before - requested);
                    }
                    Err(_) => prop_assert_eq!(&ws, &before),
                }
            }
        }
    }
}
