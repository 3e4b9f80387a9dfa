//! Storage seams of the product lifecycle.
//!
//! Each store sits behind its own trait so the coordinator can be exercised
//! against mocks or the in-memory implementations below.

use async_trait::async_trait;
use chrono::Utc;
use list_query::{ListQuery, SortDirection};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::cloudinary::DEFAULT_FOLDER;
use crate::error::{ProductError, ProductResult};
use crate::models::{
    DetailChanges, DetailOverview, ImageUpload, Product, ProductDetail, ProductInput,
    RegionStatistics, StoredImage,
};
use crate::sort::ProductSort;

/// Relational product rows. The active flag is the only existence signal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Active products matching the query
    async fn list(&self, query: &ListQuery<ProductSort>) -> ProductResult<Vec<Product>>;

    /// An active product by id
    async fn find_active(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Insert a new active row and return its id
    async fn insert(&self, input: ProductInput) -> ProductResult<i32>;

    /// Overwrite an active row; `false` when no active row has this id
    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<bool>;

    /// Clear the active flag; `false` when no row has this id
    async fn deactivate(&self, id: i32) -> ProductResult<bool>;

    /// Count, stock total and average sale price of active products per region
    async fn region_statistics(&self) -> ProductResult<Vec<RegionStatistics>>;
}

/// Detail documents keyed by product id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DetailRepository: Send + Sync {
    /// `Ok(None)` only when no document exists
    async fn find(&self, product_id: i32) -> ProductResult<Option<ProductDetail>>;

    async fn insert(&self, detail: ProductDetail) -> ProductResult<()>;

    /// Set name, description and optionally the image list, creating the document if missing
    async fn upsert(&self, product_id: i32, changes: DetailChanges) -> ProductResult<()>;

    /// `false` when there was nothing to delete
    async fn delete(&self, product_id: i32) -> ProductResult<bool>;

    /// Document and review totals; `None` when the collection is empty
    async fn overview(&self) -> ProductResult<Option<DetailOverview>>;
}

/// Hosted image assets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> ProductResult<StoredImage>;

    async fn destroy(&self, public_id: &str) -> ProductResult<()>;

    /// Folder that uploads land in; public ids of stored URLs are derived from it.
    fn folder(&self) -> &str;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    rows: Arc<RwLock<BTreeMap<i32, Product>>>,
    next_id: Arc<AtomicUsize>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row by id regardless of the active flag.
    pub async fn get_raw(&self, id: i32) -> Option<Product> {
        self.rows.read().await.get(&id).cloned()
    }

    fn row_from_input(id: i32, input: ProductInput) -> Product {
        Product {
            id,
            name: input.name,
            category_id: input.category_id,
            supplier_id: input.supplier_id,
            region: input.region,
            unit: input.unit,
            cost_price: input.cost_price,
            sale_price: input.sale_price,
            stock: input.stock,
            expiry_date: input.expiry_date,
            active: true,
            category_name: None,
            category_kind: None,
            supplier_name: None,
            supplier_address: None,
            supplier_phone: None,
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, query: &ListQuery<ProductSort>) -> ProductResult<Vec<Product>> {
        let rows = self.rows.read().await;
        let needle = query.search.as_ref().map(|s| s.to_lowercase());

        let mut result: Vec<Product> = rows
            .values()
            .filter(|p| p.active)
            .filter(|p| query.region.as_ref().is_none_or(|r| &p.region == r))
            .filter(|p| {
                needle
                    .as_ref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n.as_str()))
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            let ordering = match query.sort {
                ProductSort::Id => a.id.cmp(&b.id),
                ProductSort::Name => a.name.cmp(&b.name),
                ProductSort::SalePrice => a.sale_price.total_cmp(&b.sale_price),
                ProductSort::Stock => a.stock.cmp(&b.stock),
                ProductSort::Region => a.region.cmp(&b.region),
            };
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        result.truncate(query.limit as usize);

        Ok(result)
    }

    async fn find_active(&self, id: i32) -> ProductResult<Option<Product>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).filter(|p| p.active).cloned())
    }

    async fn insert(&self, input: ProductInput) -> ProductResult<i32> {
        let id = (self.next_id.fetch_add(1, Ordering::SeqCst) + 1) as i32;
        self.rows
            .write()
            .await
            .insert(id, Self::row_from_input(id, input));
        tracing::info!(product_id = id, "Created product");
        Ok(id)
    }

    async fn update(&self, id: i32, input: ProductInput) -> ProductResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(&id) {
            Some(row) if row.active => {
                *row = Self::row_from_input(id, input);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate(&self, id: i32) -> ProductResult<bool> {
        let mut rows = self.rows.write().await;
        Ok(rows
            .get_mut(&id)
            .map(|row| row.active = false)
            .is_some())
    }

    async fn region_statistics(&self) -> ProductResult<Vec<RegionStatistics>> {
        let rows = self.rows.read().await;
        let mut by_region: BTreeMap<&str, (i64, i64, f64)> = BTreeMap::new();
        for p in rows.values().filter(|p| p.active) {
            let entry = by_region.entry(p.region.as_str()).or_default();
            entry.0 += 1;
            entry.1 += i64::from(p.stock);
            entry.2 += p.sale_price;
        }
        Ok(by_region
            .into_iter()
            .map(|(region, (count, stock, price_sum))| RegionStatistics {
                region: region.to_string(),
                product_count: count,
                total_stock: stock,
                average_price: Some(price_sum / count as f64),
            })
            .collect())
    }
}

/// In-memory implementation of DetailRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryDetailRepository {
    documents: Arc<RwLock<HashMap<i32, ProductDetail>>>,
}

impl InMemoryDetailRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DetailRepository for InMemoryDetailRepository {
    async fn find(&self, product_id: i32) -> ProductResult<Option<ProductDetail>> {
        Ok(self.documents.read().await.get(&product_id).cloned())
    }

    async fn insert(&self, detail: ProductDetail) -> ProductResult<()> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(&detail.product_id) {
            return Err(ProductError::Document(format!(
                "duplicate detail document for product {}",
                detail.product_id
            )));
        }
        documents.insert(detail.product_id, detail);
        Ok(())
    }

    async fn upsert(&self, product_id: i32, changes: DetailChanges) -> ProductResult<()> {
        let mut documents = self.documents.write().await;
        let doc = documents
            .entry(product_id)
            .or_insert_with(|| ProductDetail {
                product_id,
                ..Default::default()
            });
        doc.name = Some(changes.name);
        doc.description = changes.description;
        if let Some(images) = changes.images {
            doc.images = images;
        }
        doc.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn delete(&self, product_id: i32) -> ProductResult<bool> {
        Ok(self.documents.write().await.remove(&product_id).is_some())
    }

    async fn overview(&self) -> ProductResult<Option<DetailOverview>> {
        let documents = self.documents.read().await;
        if documents.is_empty() {
            return Ok(None);
        }
        Ok(Some(DetailOverview {
            documents: documents.len() as i64,
            reviews: documents.values().map(|d| d.reviews.len() as i64).sum(),
        }))
    }
}

/// In-memory implementation of ImageStore (for development/testing)
///
/// Hands out Cloudinary-shaped URLs so the public id round-trips.
#[derive(Debug, Clone)]
pub struct InMemoryImageStore {
    folder: String,
    assets: Arc<RwLock<HashMap<String, usize>>>,
    destroyed: Arc<RwLock<Vec<String>>>,
    counter: Arc<AtomicUsize>,
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::with_folder(DEFAULT_FOLDER)
    }
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            assets: Arc::default(),
            destroyed: Arc::default(),
            counter: Arc::default(),
        }
    }

    /// Public ids currently stored.
    pub async fn stored(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.assets.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Public ids passed to `destroy`, in call order.
    pub async fn destroyed(&self) -> Vec<String> {
        self.destroyed.read().await.clone()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload(&self, image: ImageUpload) -> ProductResult<StoredImage> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let stem = format!("img{}", n);
        let public_id = format!("{}/{}", self.folder, stem);
        let url = format!(
            "https://res.cloudinary.com/local/image/upload/v1/{}.jpg",
            public_id
        );
        self.assets
            .write()
            .await
            .insert(public_id.clone(), image.bytes.len());
        Ok(StoredImage { url, public_id })
    }

    async fn destroy(&self, public_id: &str) -> ProductResult<()> {
        self.destroyed.write().await.push(public_id.to_string());
        match self.assets.write().await.remove(public_id) {
            Some(_) => Ok(()),
            None => Err(ProductError::ImageStore(format!(
                "asset {} not found",
                public_id
            ))),
        }
    }

    fn folder(&self) -> &str {
        &self.folder
    }
}
