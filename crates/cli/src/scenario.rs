//! Batch input: warehouses plus the orders to run against them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroute_inventory::Warehouse;
use stockroute_products::{Catalog, ProductCategory};
use stockroute_sales::{Order, OrderLine};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One batch and the stock it runs against.
///
/// ```json
/// {"warehouses":[{"id":"W1","inventory":{"T0001":5}}],
///  "orders":[{"id":1,"items":[{"product_id":"T0001","quantity":1}]}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Scenario {
    pub fn from_json(path: &Path, raw: &str) -> Result<Self, ScenarioError> {
        serde_json::from_str(raw).map_err(|source| ScenarioError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(path, &raw)?;
        tracing::info!(
            path = %path.display(),
            warehouses = scenario.warehouses.len(),
            orders = scenario.orders.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Built-in demo: two warehouses and a batch with one order per outcome
    /// (single shipment from W1, single shipment from W2, out of stock,
    /// invalid quantity). Product ids come from the returned catalog.
    pub fn demo() -> (Self, Catalog) {
        let mut catalog = Catalog::new();
        let laptop = catalog.register("Laptop", ProductCategory::Technology);
        let mouse = catalog.register("Mouse", ProductCategory::Technology);
        let keyboard = catalog.register("Keyboard", ProductCategory::Technology);

        let warehouses = vec![
            Warehouse::new("W1")
                .with_stock(laptop.clone(), 5)
                .with_stock(mouse.clone(), 20),
            Warehouse::new("W2")
                .with_stock(laptop.clone(), 2)
                .with_stock(keyboard.clone(), 10),
        ];

        let orders = vec![
            Order::new(
                1001,
                vec![OrderLine::new(laptop.clone(), 1), OrderLine::new(mouse.clone(), 2)],
            ),
            Order::new(1002, vec![OrderLine::new(keyboard, 1)]),
            Order::new(1003, vec![OrderLine::new(laptop, 99)]),
            Order::new(1004, vec![OrderLine::new(mouse, -1)]),
        ];

        (Self { warehouses, orders }, catalog)
    }
}
