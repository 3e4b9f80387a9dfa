//! Catalog Service - reference data and guarded deletes

use std::sync::Arc;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Branch, Category, CategoryInput, Supplier, SupplierInput};
use crate::repository::CatalogRepository;

pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.repository.list_categories().await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CategoryInput) -> CatalogResult<i32> {
        self.repository.insert_category(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(&self, id: i32, input: CategoryInput) -> CatalogResult<()> {
        if self.repository.update_category(id, input).await? {
            Ok(())
        } else {
            Err(CatalogError::CategoryNotFound(id))
        }
    }

    /// Soft delete, refused while any active product uses the category
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: i32) -> CatalogResult<()> {
        let products = self.repository.count_category_products(id).await?;
        if products > 0 {
            tracing::warn!(category_id = id, products, "Category still in use");
            return Err(CatalogError::CategoryInUse { id, products });
        }
        if !self.repository.deactivate_category(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        tracing::info!(category_id = id, "Category deactivated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> CatalogResult<Vec<Supplier>> {
        self.repository.list_suppliers().await
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_supplier(&self, input: SupplierInput) -> CatalogResult<i32> {
        self.repository.insert_supplier(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_supplier(&self, id: i32, input: SupplierInput) -> CatalogResult<()> {
        if self.repository.update_supplier(id, input).await? {
            Ok(())
        } else {
            Err(CatalogError::SupplierNotFound(id))
        }
    }

    /// Soft delete, refused while any active product comes from the supplier
    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, id: i32) -> CatalogResult<()> {
        let products = self.repository.count_supplier_products(id).await?;
        if products > 0 {
            tracing::warn!(supplier_id = id, products, "Supplier still in use");
            return Err(CatalogError::SupplierInUse { id, products });
        }
        if !self.repository.deactivate_supplier(id).await? {
            return Err(CatalogError::SupplierNotFound(id));
        }
        tracing::info!(supplier_id = id, "Supplier deactivated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_branches(&self) -> CatalogResult<Vec<Branch>> {
        self.repository.list_branches().await
    }

    #[instrument(skip(self))]
    pub async fn get_branch(&self, id: i32) -> CatalogResult<Branch> {
        self.repository
            .find_branch(id)
            .await?
            .ok_or(CatalogError::BranchNotFound(id))
    }
}
