use serde::{Deserialize, Serialize};

use stockroute_core::{Entity, ProductId};

use crate::id_generator::ProductIdGenerator;

/// Product category; determines the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Technology,
    Beauty,
    HomeAppliance,
    Uncategorized,
}

impl ProductCategory {
    /// Single-letter prefix used in generated product ids.
    pub fn prefix(self) -> char {
        match self {
            ProductCategory::Technology => 'T',
            ProductCategory::Beauty => 'B',
            ProductCategory::HomeAppliance => 'H',
            ProductCategory::Uncategorized => 'U',
        }
    }
}

/// Catalog product.
///
/// Products carry no stock; quantities live in warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: ProductCategory,
}

impl Product {
    /// Create a product, drawing its id from `ids`.
    ///
    /// The id is assigned exactly once, here.
    pub fn new(name: impl Into<String>, category: ProductCategory, ids: &ProductIdGenerator) -> Self {
        Self {
            id: ids.next_id(category),
            name: name.into(),
            category,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> ProductCategory {
        self.category
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_takes_id_from_its_category_counter() {
        let ids = ProductIdGenerator::new();
        let laptop = Product::new("Laptop", ProductCategory::Technology, &ids);
        let lipstick = Product::new("Lipstick", ProductCategory::Beauty, &ids);
        let mouse = Product::new("Mouse", ProductCategory::Technology, &ids);

        assert_eq!(laptop.id().as_str(), "T0001");
        assert_eq!(lipstick.id().as_str(), "B0001");
        assert_eq!(mouse.id().as_str(), "T0002");
        assert_eq!(mouse.name(), "Mouse");
        assert_eq!(mouse.category(), ProductCategory::Technology);
    }

    #[test]
    fn prefixes_are_distinct() {
        let prefixes = [
            ProductCategory::Technology.prefix(),
            ProductCategory::Beauty.prefix(),
            ProductCategory::HomeAppliance.prefix(),
            ProductCategory::Uncategorized.prefix(),
        ];
        for (i, a) in prefixes.iter().enumerate() {
            for b in &prefixes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
