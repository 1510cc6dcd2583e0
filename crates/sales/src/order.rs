use serde::{Deserialize, Serialize};

use stockroute_core::{OrderId, ProductId};

/// Order line: product and requested quantity.
///
/// The quantity is signed so that bad input (zero, negative) survives until the
/// validator can report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A customer order: id plus lines in the order they were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    /// Missing in JSON input means "no items"; the validator rejects it.
    #[serde(default)]
    items: Vec<OrderLine>,
}

impl Order {
    pub fn new(id: i64, items: Vec<OrderLine>) -> Self {
        Self {
            id: OrderId::new(id),
            items,
        }
    }

    /// Convenience constructor from `(product, quantity)` pairs.
    pub fn from_items<P, I>(id: i64, items: I) -> Self
    where
        P: Into<ProductId>,
        I: IntoIterator<Item = (P, i64)>,
    {
        Self::new(
            id,
            items
                .into_iter()
                .map(|(product, quantity)| OrderLine::new(product, quantity))
                .collect(),
        )
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }

    /// Requested quantity for `product_id`, summed over lines.
    pub fn requested(&self, product_id: &ProductId) -> i64 {
        self.items
            .iter()
            .filter(|line| &line.product_id == product_id)
            .map(|line| line.quantity)
            .sum()
    }
}
