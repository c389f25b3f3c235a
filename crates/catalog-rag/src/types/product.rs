//! Product records and their document renderings

use serde::{Deserialize, Serialize};

/// A catalog record. Immutable after load; owned by the [`Catalog`] and
/// borrowed, never copied, by retrieval results.
///
/// [`Catalog`]: crate::catalog::Catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id
    pub id: u64,
    /// Product name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Price in catalog currency units
    pub price: f64,
}

impl Product {
    /// Render this product as the document text used for embedding.
    ///
    /// Field order is fixed: title, description, price. The same rendering
    /// is used at index build and nowhere else, so a given catalog always
    /// embeds identically.
    pub fn to_document(&self) -> Document {
        Document {
            product_id: self.id,
            text: format!(
                "Title: {}\nDescription: {}\nPrice: {}",
                self.name, self.description, self.price
            ),
        }
    }
}

/// Text representation of one [`Product`], 1:1, created at index-build time.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Back-reference to the source product
    pub product_id: u64,
    /// Text blob handed to the embedding provider
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mug() -> Product {
        Product {
            id: 1,
            name: "Mug".to_string(),
            description: "Ceramic mug".to_string(),
            price: 10.0,
        }
    }

    #[test]
    fn test_document_rendering() {
        let doc = mug().to_document();

        assert_eq!(doc.product_id, 1);
        assert_eq!(doc.text, "Title: Mug\nDescription: Ceramic mug\nPrice: 10");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let product = mug();
        assert_eq!(product.to_document(), product.to_document());
    }

    #[test]
    fn test_product_json_shape() {
        let json = r#"{"id":2,"name":"Pen","description":"Blue ink pen","price":2}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 2);
        assert_eq!(product.name, "Pen");
        assert_eq!(product.price, 2.0);
    }
}
