//! Batch result rendering: a plain-text report and a JSON document.

use core::fmt;

use serde::Serialize;

use stockroute_core::{Entity, ProductId};
use stockroute_fulfillment::FulfillmentResult;
use stockroute_inventory::Warehouse;
use stockroute_products::Catalog;

/// Text report over one batch result and the stock it left behind.
pub struct Report<'a> {
    result: &'a FulfillmentResult,
    warehouses: &'a [Warehouse],
    catalog: Option<&'a Catalog>,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a FulfillmentResult, warehouses: &'a [Warehouse], catalog: Option<&'a Catalog>) -> Self {
        Self {
            result,
            warehouses,
            catalog,
        }
    }

    /// "Laptop (T0001)" when the catalog knows the product, else the bare id.
    fn label(&self, product_id: &ProductId) -> String {
        match self.catalog.and_then(|c| c.name_of(product_id)) {
            Some(name) => format!("{name} ({product_id})"),
            None => product_id.to_string(),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(
            f,
            "batch {}: {} fulfilled, {} failed",
            result.batch_id,
            result.plans.len(),
            result.failures.len()
        )?;

        writeln!(f, "Fulfilled:")?;
        if result.plans.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for plan in &result.plans {
            writeln!(f, "  order {}", plan.order_id)?;
            for shipment in &plan.shipments {
                let items: Vec<String> = shipment
                    .items
                    .iter()
                    .map(|line| format!("{} x{}", self.label(&line.product_id), line.quantity))
                    .collect();
                writeln!(f, "    {}: {}", shipment.warehouse_id, items.join(", "))?;
            }
        }

        writeln!(f, "Failed:")?;
        if result.failures.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for failure in &result.failures {
            writeln!(f, "  order {} [{}] {}", failure.order_id, failure.kind, failure.reason)?;
        }

        if result.has_unexpected_errors() {
            writeln!(f, "Unexpected faults:")?;
            for fault in &result.unexpected {
                writeln!(f, "  order {} during {}: {}", fault.order_id, fault.phase, fault.message)?;
            }
        }

        writeln!(f, "Ending inventory:")?;
        for warehouse in self.warehouses {
            let stock: Vec<String> = warehouse
                .inventory()
                .iter()
                .map(|(product_id, qty)| format!("{}={}", self.label(product_id), qty))
                .collect();
            if stock.is_empty() {
                writeln!(f, "  {}: (empty)", warehouse.id())?;
            } else {
                writeln!(f, "  {}: {}", warehouse.id(), stock.join(", "))?;
            }
        }
        Ok(())
    }
}

/// `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub result: &'a FulfillmentResult,
    pub warehouses: &'a [Warehouse],
}
