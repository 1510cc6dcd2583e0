//! Per-category product id generator.

use std::collections::HashMap;

use parking_lot::Mutex;

use stockroute_core::ProductId;

use crate::product::ProductCategory;

/// Issues `<prefix><counter:04>` ids, one monotonic counter per category.
///
/// One generator belongs to one catalog-build context. It is `Sync`, so
/// products can be created from several threads against the same generator.
#[derive(Debug, Default)]
pub struct ProductIdGenerator {
    counters: Mutex<HashMap<ProductCategory, u32>>,
}

impl ProductIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next id for `category`.
    pub fn next_id(&self, category: ProductCategory) -> ProductId {
        let n = {
            let mut counters = self.counters.lock();
            let counter = counters.entry(category).or_insert(0);
            *counter += 1;
            *counter
        };
        ProductId::new(format!("{}{:04}", category.prefix(), n))
    }

    /// Number of ids issued so far for `category`.
    pub fn issued(&self, category: ProductCategory) -> u32 {
        self.counters.lock().get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn counters_are_independent_per_category() {
        let ids = ProductIdGenerator::new();
        assert_eq!(ids.next_id(ProductCategory::HomeAppliance).as_str(), "H0001");
        assert_eq!(ids.next_id(ProductCategory::HomeAppliance).as_str(), "H0002");
        assert_eq!(ids.next_id(ProductCategory::Uncategorized).as_str(), "U0001");
        assert_eq!(ids.issued(ProductCategory::HomeAppliance), 2);
        assert_eq!(ids.issued(ProductCategory::Beauty), 0);
    }

    #[test]
    fn separate_generators_do_not_share_state() {
        let a = ProductIdGenerator::new();
        let b = ProductIdGenerator::new();
        a.next_id(ProductCategory::Technology);
        assert_eq!(b.next_id(ProductCategory::Technology).as_str(), "T0001");
    }

    #[test]
    fn concurrent_generation_never_reuses_an_id() {
        let ids = Arc::new(ProductIdGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || {
                    (0..100)
                        .map(|_| ids.next_id(ProductCategory::Technology))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id issued");
            }
        }
        assert_eq!(seen.len(), 800);
        assert_eq!(ids.issued(ProductCategory::Technology), 800);
    }
}
