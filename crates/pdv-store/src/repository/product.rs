//! # Product Repository
//!
//! The catalog shown on the sales screen.
//!
//! ## Category Browsing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How the Sales Screen Browses                         │
//! │                                                                         │
//! │  Operator taps: "Bebidas" (category 1)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  list_by_category(1)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │ products (id order)                     │                            │
//! │  │                                         │                            │
//! │  │ 1 | Água Mineral 500ml | cat 1          │ ← MATCH                    │
//! │  │ 2 | Refrigerante Cola  | cat 1          │ ← MATCH                    │
//! │  │ 6 | Maçã Fuji (kg)     | cat 2          │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [1, 2]                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::StoreInner;
use pdv_core::validation::validate_product;
use pdv_core::{NewProduct, Product};

/// Repository for catalog products.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// let drinks = repo.list_by_category(1).await?;
/// let water = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    inner: Arc<StoreInner>,
}

impl ProductRepository {
    pub(crate) fn new(inner: Arc<StoreInner>) -> Self {
        ProductRepository { inner }
    }

    /// Creates a product.
    ///
    /// ## Errors
    /// - `Domain` for a blank name or negative price
    /// - `ForeignKeyViolation` if `category_id` does not exist
    pub async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        let input = validate_product(&input)?;
        let mut tables = self.inner.tables.write().await;

        if !tables.categories.contains_key(&input.category_id) {
            return Err(StoreError::dangling("categoryId", input.category_id));
        }

        let id = self.inner.ids.products.next_id();
        debug!(id, name = %input.name, price = %input.price, "Creating product");

        let product = Product {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            image_url: input.image_url,
            category_id: input.category_id,
            in_stock: input.in_stock,
        };
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.inner.tables.read().await.products.get(&id).cloned())
    }

    pub async fn list_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self
            .inner
            .tables
            .read()
            .await
            .products
            .values()
            .cloned()
            .collect())
    }

    /// Products of one category, in id order. An unknown category yields an
    /// empty list.
    pub async fn list_by_category(&self, category_id: i64) -> StoreResult<Vec<Product>> {
        debug!(category_id, "Listing products by category");

        let tables = self.inner.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
