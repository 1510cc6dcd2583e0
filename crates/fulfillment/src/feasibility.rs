//! Aggregate availability check, run before any allocation.

use stockroute_core::{FulfillmentError, FulfillmentOutcome};
use stockroute_inventory::Warehouse;

use crate::validator::ValidatedOrder;

/// Verify that, across all warehouses together, every product of the order is
/// stocked and stocked in sufficient quantity. Read-only.
///
/// Reports the first failing product: `NoFulfillmentPath` if no warehouse holds
/// any, `OutOfStock` if the total falls short.
pub fn check(order: &ValidatedOrder, warehouses: &[Warehouse]) -> FulfillmentOutcome<()> {
    for line in order.lines() {
        let mut total: u64 = 0;
        for warehouse in warehouses {
            total = total
                .checked_add(warehouse.available(&line.product_id))
                .ok_or_else(|| {
                    FulfillmentError::unexpected(format!(
                        "total availability of '{}' overflows",
                        line.product_id
                    ))
                })?;
        }

        if total == 0 {
            return Err(FulfillmentError::no_fulfillment_path(format!(
                "product '{}' is not stocked in any warehouse",
                line.product_id
            )));
        }
        if total < line.quantity {
            return Err(FulfillmentError::OutOfStock {
                product_id: line.product_id.clone(),
                requested: line.quantity,
                available: total,
            });
        }
    }
    Ok(())
}
