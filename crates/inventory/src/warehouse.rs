use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroute_core::{Entity, ProductId, WarehouseId};

/// A stock location: product id → available quantity.
///
/// Quantities are unsigned, so stock can never be negative. Outside of seeding
/// the only writer is the reservation committer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    id: WarehouseId,
    #[serde(default)]
    inventory: BTreeMap<ProductId, u64>,
}

impl Warehouse {
    pub fn new(id: impl Into<WarehouseId>) -> Self {
        Self {
            id: id.into(),
            inventory: BTreeMap::new(),
        }
    }

    /// Seed stock (builder style). Adds to any quantity already present,
    /// saturating at `u64::MAX`.
    pub fn with_stock(mut self, product_id: impl Into<ProductId>, quantity: u64) -> Self {
        let slot = self.inventory.entry(product_id.into()).or_insert(0);
        *slot = slot.saturating_add(quantity);
        self
    }

    /// Available quantity; products never stocked here report zero.
    pub fn available(&self, product_id: &ProductId) -> u64 {
        self.inventory.get(product_id).copied().unwrap_or(0)
    }

    pub fn inventory(&self) -> &BTreeMap<ProductId, u64> {
        &self.inventory
    }

    /// Sum of all quantities held here.
    pub fn total_units(&self) -> u128 {
        self.inventory.values().map(|&q| q as u128).sum()
    }

    /// Decrement stock. Callers must have checked availability first.
    pub(crate) fn deduct(&mut self, product_id: &ProductId, quantity: u64) {
        let slot = self.inventory.entry(product_id.clone()).or_insert(0);
        *slot -= quantity;
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
