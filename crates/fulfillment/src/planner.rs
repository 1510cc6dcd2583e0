//! Allocation planning.
//!
//! Strategy, per order:
//! - **Single warehouse** if any warehouse can ship every line on its own. Among
//!   those, the one with the lowest leftover score (Σ available − requested)
//!   wins; ties go to the earliest warehouse.
//! - **Greedy split** otherwise: on a private snapshot, each line draws from
//!   the warehouses with the most remaining stock first.
//!
//! Planning never writes to live stock. The engine commits the returned plan
//! through `stockroute_inventory::commit`.

use std::cmp::Reverse;

use stockroute_core::{Entity, FulfillmentError, FulfillmentOutcome};
use stockroute_inventory::{ShipmentAllocation, StockLine, Warehouse};

use crate::result::FulfillmentPlan;
use crate::validator::ValidatedOrder;

/// Compute a plan for `order` against the current state of `warehouses`.
///
/// Deterministic: the same order and stock always produce the same plan.
pub fn plan(order: &ValidatedOrder, warehouses: &[Warehouse]) -> FulfillmentOutcome<FulfillmentPlan> {
    if let Some(idx) = best_single_warehouse(order, warehouses) {
        let warehouse = &warehouses[idx];
        tracing::debug!(order_id = %order.id(), warehouse_id = %warehouse.id(), "single-warehouse plan");
        return Ok(FulfillmentPlan::new(
            order.id(),
            vec![ShipmentAllocation::new(
                warehouse.id().clone(),
                order.lines().to_vec(),
            )],
        ));
    }

    let shipments = split(order, warehouses)?;
    tracing::debug!(
        order_id = %order.id(),
        shipments = shipments.len(),
        "split plan"
    );
    Ok(FulfillmentPlan::new(order.id(), shipments))
}

/// Index of the warehouse that can ship the whole order with the least stock
/// left over, if any can.
pub fn best_single_warehouse(order: &ValidatedOrder, warehouses: &[Warehouse]) -> Option<usize> {
    warehouses
        .iter()
        .enumerate()
        .filter(|(_, w)| covers(w, order))
        .min_by_key(|(_, w)| leftover_score(w, order))
        .map(|(idx, _)| idx)
}

/// Σ (available − requested) over the order's lines.
///
/// Only meaningful for warehouses that cover the order.
pub fn leftover_score(warehouse: &Warehouse, order: &ValidatedOrder) -> u128 {
    order
        .lines()
        .iter()
        .map(|line| warehouse.available(&line.product_id).saturating_sub(line.quantity) as u128)
        .sum()
}

fn covers(warehouse: &Warehouse, order: &ValidatedOrder) -> bool {
    order
        .lines()
        .iter()
        .all(|line| warehouse.available(&line.product_id) >= line.quantity)
}

fn split(order: &ValidatedOrder, warehouses: &[Warehouse]) -> FulfillmentOutcome<Vec<ShipmentAllocation>> {
    // snapshot[w][l]: stock of line l's product left at warehouse w
    let mut snapshot: Vec<Vec<u64>> = warehouses
        .iter()
        .map(|w| {
            order
                .lines()
                .iter()
                .map(|line| w.available(&line.product_id))
                .collect()
        })
        .collect();

    // (warehouse index, lines drawn there), in first-draw order
    let mut draws: Vec<(usize, Vec<StockLine>)> = Vec::new();

    for (l, line) in order.lines().iter().enumerate() {
        let mut ranked: Vec<usize> = (0..warehouses.len()).collect();
        // stable: equal stock keeps warehouse order
        ranked.sort_by_key(|&w| Reverse(snapshot[w][l]));

        let mut need = line.quantity;
        for w in ranked {
            if need == 0 {
                break;
            }
            let have = snapshot[w][l];
            if have == 0 {
                continue;
            }

            let take = have.min(need);
            snapshot[w][l] = have - take;
            need -= take;

            let drawn = StockLine::new(line.product_id.clone(), take);
            match draws.iter_mut().find(|(idx, _)| *idx == w) {
                Some((_, lines)) => lines.push(drawn),
                None => draws.push((w, vec![drawn])),
            }
        }

        if need > 0 {
            return Err(FulfillmentError::no_fulfillment_path(format!(
                "could not fully allocate '{}' for order {}",
                line.product_id,
                order.id()
            )));
        }
    }

    Ok(draws
        .into_iter()
        .map(|(w, lines)| ShipmentAllocation::new(warehouses[w].id().clone(), lines))
        .collect())
}
