use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CatalogResult;
use crate::models::{Branch, Category, CategoryInput, Supplier, SupplierInput};

/// Repository trait for the reference tables
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Active categories, newest first
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    async fn insert_category(&self, input: CategoryInput) -> CatalogResult<i32>;

    /// `false` when no active category has this id
    async fn update_category(&self, id: i32, input: CategoryInput) -> CatalogResult<bool>;

    /// `false` when no active category has this id
    async fn deactivate_category(&self, id: i32) -> CatalogResult<bool>;

    /// Number of active products in a category
    async fn count_category_products(&self, id: i32) -> CatalogResult<u64>;

    /// Active suppliers, newest first
    async fn list_suppliers(&self) -> CatalogResult<Vec<Supplier>>;

    async fn insert_supplier(&self, input: SupplierInput) -> CatalogResult<i32>;

    async fn update_supplier(&self, id: i32, input: SupplierInput) -> CatalogResult<bool>;

    async fn deactivate_supplier(&self, id: i32) -> CatalogResult<bool>;

    /// Number of active products from a supplier
    async fn count_supplier_products(&self, id: i32) -> CatalogResult<u64>;

    /// Active branches, newest first
    async fn list_branches(&self) -> CatalogResult<Vec<Branch>>;

    /// A branch by id, active or not
    async fn find_branch(&self, id: i32) -> CatalogResult<Option<Branch>>;
}

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    suppliers: BTreeMap<i32, Supplier>,
    branches: BTreeMap<i32, Branch>,
    /// (category id, supplier id) of each active product
    products: Vec<(i32, Option<i32>)>,
}

/// In-memory implementation of CatalogRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an active product referencing a category and optionally a supplier.
    pub async fn add_product_reference(&self, category_id: i32, supplier_id: Option<i32>) {
        self.tables
            .write()
            .await
            .products
            .push((category_id, supplier_id));
    }

    pub async fn add_branch(&self, branch: Branch) {
        self.tables
            .write()
            .await
            .branches
            .insert(branch.id, branch);
    }

    /// Category by id regardless of the active flag.
    pub async fn get_category(&self, id: i32) -> Option<Category> {
        self.tables.read().await.categories.get(&id).cloned()
    }

    fn next_id<T>(rows: &BTreeMap<i32, T>) -> i32 {
        rows.keys().next_back().copied().unwrap_or(0) + 1
    }
}

fn newest_active<T: Clone>(rows: &BTreeMap<i32, T>, active: impl Fn(&T) -> bool) -> Vec<T> {
    rows.values().rev().filter(|r| active(r)).cloned().collect()
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(newest_active(&tables.categories, |c| c.active))
    }

    async fn insert_category(&self, input: CategoryInput) -> CatalogResult<i32> {
        let mut tables = self.tables.write().await;
        let id = Self::next_id(&tables.categories);
        tables.categories.insert(
            id,
            Category {
                id,
                name: input.name,
                kind: input.kind,
                active: true,
            },
        );
        Ok(id)
    }

    async fn update_category(&self, id: i32, input: CategoryInput) -> CatalogResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.categories.get_mut(&id) {
            Some(category) if category.active => {
                category.name = input.name;
                category.kind = input.kind;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate_category(&self, id: i32) -> CatalogResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.categories.get_mut(&id) {
            Some(category) if category.active => {
                category.active = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_category_products(&self, id: i32) -> CatalogResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().filter(|(c, _)| *c == id).count() as u64)
    }

    async fn list_suppliers(&self) -> CatalogResult<Vec<Supplier>> {
        let tables = self.tables.read().await;
        Ok(newest_active(&tables.suppliers, |s| s.active))
    }

    async fn insert_supplier(&self, input: SupplierInput) -> CatalogResult<i32> {
        let mut tables = self.tables.write().await;
        let id = Self::next_id(&tables.suppliers);
        tables.suppliers.insert(
            id,
            Supplier {
                id,
                name: input.name,
                address: input.address,
                phone: input.phone,
                email: input.email,
                active: true,
            },
        );
        Ok(id)
    }

    async fn update_supplier(&self, id: i32, input: SupplierInput) -> CatalogResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.suppliers.get_mut(&id) {
            Some(supplier) if supplier.active => {
                supplier.name = input.name;
                supplier.address = input.address;
                supplier.phone = input.phone;
                supplier.email = input.email;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate_supplier(&self, id: i32) -> CatalogResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.suppliers.get_mut(&id) {
            Some(supplier) if supplier.active => {
                supplier.active = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_supplier_products(&self, id: i32) -> CatalogResult<u64> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .filter(|(_, s)| *s == Some(id))
            .count() as u64)
    }

    async fn list_branches(&self) -> CatalogResult<Vec<Branch>> {
        let tables = self.tables.read().await;
        Ok(newest_active(&tables.branches, |b| b.active))
    }

    async fn find_branch(&self, id: i32) -> CatalogResult<Option<Branch>> {
        Ok(self.tables.read().await.branches.get(&id).cloned())
    }
}
