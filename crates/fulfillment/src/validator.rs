//! Structural order validation.
//!
//! Pure functions of their input; safe to call from any number of threads.

use std::collections::HashSet;

use stockroute_core::{FulfillmentError, FulfillmentOutcome, OrderId, ProductId};
use stockroute_inventory::StockLine;
use stockroute_products::Catalog;
use stockroute_sales::Order;

/// An order that passed structural validation.
///
/// Quantities are strictly positive and product keys are non-blank and unique.
/// Only [`validate`] constructs this type, so the planner cannot be handed an
/// unchecked order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    id: OrderId,
    lines: Vec<StockLine>,
}

impl ValidatedOrder {
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Lines in the order they were requested.
    pub fn lines(&self) -> &[StockLine] {
        &self.lines
    }

    pub fn requested(&self, product_id: &ProductId) -> u64 {
        self.lines
            .iter()
            .find(|line| &line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }
}

/// Check the order's shape. The first violated rule is reported.
pub fn validate(order: &Order) -> FulfillmentOutcome<ValidatedOrder> {
    if order.items().is_empty() {
        return Err(FulfillmentError::invalid_order("order has no items"));
    }

    let mut seen = HashSet::with_capacity(order.items().len());
    let mut lines = Vec::with_capacity(order.items().len());

    for item in order.items() {
        if item.product_id.is_blank() {
            return Err(FulfillmentError::invalid_order("order has a blank product key"));
        }
        if item.quantity <= 0 {
            return Err(FulfillmentError::invalid_order(format!(
                "invalid qty for '{}': {}",
                item.product_id, item.quantity
            )));
        }
        if !seen.insert(&item.product_id) {
            return Err(FulfillmentError::invalid_order(format!(
                "duplicate product key '{}'",
                item.product_id
            )));
        }
        // quantity > 0 here, so the conversion is lossless
        lines.push(StockLine::new(item.product_id.clone(), item.quantity as u64));
    }

    Ok(ValidatedOrder {
        id: order.id(),
        lines,
    })
}

/// Reject products the catalog does not know.
pub fn check_catalog(order: &ValidatedOrder, catalog: &Catalog) -> FulfillmentOutcome<()> {
    match order.lines().iter().find(|line| !catalog.contains(&line.product_id)) {
        Some(line) => Err(FulfillmentError::UnknownProduct(line.product_id.clone())),
        None => Ok(()),
    }
}
