//! # Category Repository

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::store::StoreInner;
use pdv_core::validation::validate_category;
use pdv_core::{Category, NewCategory};

/// Repository for product categories.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    inner: Arc<StoreInner>,
}

impl CategoryRepository {
    pub(crate) fn new(inner: Arc<StoreInner>) -> Self {
        CategoryRepository { inner }
    }

    /// Creates a category after checking its name and icon.
    pub async fn create(&self, input: NewCategory) -> StoreResult<Category> {
        let input = validate_category(&input)?;
        let mut tables = self.inner.tables.write().await;

        let id = self.inner.ids.categories.next_id();
        debug!(id, name = %input.name, "Creating category");

        let category = Category {
            id,
            name: input.name,
            icon: input.icon,
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.inner.tables.read().await.categories.get(&id).cloned())
    }

    pub async fn list_all(&self) -> StoreResult<Vec<Category>> {
        Ok(self
            .inner
            .tables
            .read()
            .await
            .categories
            .values()
            .cloned()
            .collect())
    }
}
