use std::collections::BTreeMap;

use stockroute_core::{Entity, ProductId};

use crate::id_generator::ProductIdGenerator;
use crate::product::{Product, ProductCategory};

/// Set of known products, keyed by id.
///
/// Owns the id generator for its build context.
#[derive(Debug, Default)]
pub struct Catalog {
    ids: ProductIdGenerator,
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a product, returning its freshly assigned id.
    pub fn register(&mut self, name: impl Into<String>, category: ProductCategory) -> ProductId {
        let product = Product::new(name, category, &self.ids);
        let id = product.id().clone();
        tracing::debug!(product_id = %id, name = product.name(), "product registered");
        self.products.insert(id.clone(), product);
        id
    }

    /// Generator backing this catalog, for callers that build products in parallel.
    pub fn id_generator(&self) -> &ProductIdGenerator {
        &self.ids
    }

    /// Add a product built elsewhere (e.g. from [`Catalog::id_generator`]).
    ///
    /// Returns the replaced product if the id was already present.
    pub fn insert(&mut self, product: Product) -> Option<Product> {
        self.products.insert(product.id().clone(), product)
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    /// Display name for `id`, if catalogued.
    pub fn name_of(&self, id: &ProductId) -> Option<&str> {
        self.products.get(id).map(Product::name)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
