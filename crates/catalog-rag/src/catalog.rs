//! Product catalog: owns the records and the id lookup

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Product;

/// Owned, immutable product catalog.
///
/// Built once before the index; read-only for the rest of the session.
/// Duplicate ids are rejected at construction rather than overwriting
/// silently.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<u64, usize>,
}

impl Catalog {
    /// Build a catalog from loaded products, validating id uniqueness
    pub fn from_products(products: Vec<Product>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(products.len());
        for (slot, product) in products.iter().enumerate() {
            if by_id.insert(product.id, slot).is_some() {
                return Err(Error::catalog(format!(
                    "duplicate product id {} ({})",
                    product.id, product.name
                )));
            }
        }
        Ok(Self { products, by_id })
    }

    /// Load a catalog from a JSON file containing a flat product array
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        tracing::info!("Loaded {} products from {}", products.len(), path.display());
        Self::from_products(products)
    }

    /// Look up a product by id
    pub fn get(&self, id: u64) -> Option<&Product> {
        self.by_id.get(&id).map(|&slot| &self.products[slot])
    }

    /// Products in original catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            price: 1.0,
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog =
            Catalog::from_products(vec![product(1, "Mug"), product(2, "Pen")]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(2).unwrap().name, "Pen");
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_products(vec![product(1, "Mug"), product(1, "Pen")]);

        match result {
            Err(Error::Catalog(msg)) => assert!(msg.contains("duplicate product id 1")),
            other => panic!("expected catalog error, got {:?}", other),
        }
    }

    #[test]
    fn test_iteration_preserves_order() {
        let catalog =
            Catalog::from_products(vec![product(3, "C"), product(1, "A"), product(2, "B")])
                .unwrap();
        let names: Vec<&str> = catalog.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
