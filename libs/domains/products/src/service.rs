//! Product lifecycle coordinator.
//!
//! Each write spans the relational row, the detail document and the hosted
//! images. The stores share no transaction, so every operation is an ordered
//! list of steps:
//!
//! | Operation | Steps | Failure handling |
//! |-----------|-------|------------------|
//! | create | insert row, upload image, insert document | row error fatal; upload error reported as `imageError`; document error compensated (row deactivated, image destroyed) then fatal |
//! | update | update row, upload image, replace image list, upsert text | row error fatal (404 when inactive); upload error reported, prior images kept; document read error destroys the new image then fatal |
//! | delete | read document, destroy images, delete document, deactivate row | image errors logged; store errors fatal |
//!
//! Two concurrent updates of the same product both read the prior image list
//! before either writes, so an image uploaded by the loser may be left orphaned.

use list_query::{ListParams, ListQuery};
use std::sync::Arc;
use tracing::instrument;

use crate::cloudinary::public_id_from_url;
use crate::error::{ProductError, ProductResult};
use crate::form::ProductForm;
use crate::models::{
    CleanupReport, CreatedProduct, DetailChanges, Product, ProductDetail, ProductView,
    Statistics, StoredImage, UpdatedProduct,
};
use crate::repository::{DetailRepository, ImageStore, ProductRepository};

/// Product service coordinating the relational, document and image stores
pub struct ProductService<R, D, I>
where
    R: ProductRepository,
    D: DetailRepository,
    I: ImageStore,
{
    products: Arc<R>,
    details: Arc<D>,
    images: Arc<I>,
}

impl<R, D, I> ProductService<R, D, I>
where
    R: ProductRepository,
    D: DetailRepository,
    I: ImageStore,
{
    pub fn new(products: R, details: D, images: I) -> Self {
        Self {
            products: Arc::new(products),
            details: Arc::new(details),
            images: Arc::new(images),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, params: &ListParams) -> ProductResult<Vec<Product>> {
        let query = ListQuery::from_params(params);
        self.products.list(&query).await
    }

    /// Active row overlaid with its detail document.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<ProductView> {
        let product = self
            .products
            .find_active(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        let detail = self.details.find(id).await?;
        Ok(ProductView::merge(product, detail))
    }

    #[instrument(skip(self, form), fields(product_name = %form.input.name, has_image = form.image.is_some()))]
    pub async fn create_product(&self, form: ProductForm) -> ProductResult<CreatedProduct> {
        let ProductForm { input, image } = form;
        let name = input.name.clone();
        let description = input.description.clone();

        let id = self.products.insert(input).await?;

        let mut stored = None;
        let mut image_error = None;
        if let Some(upload) = image {
            match self.images.upload(upload).await {
                Ok(image) => stored = Some(image),
                Err(e) => {
                    tracing::warn!(product_id = id, error = %e, "Image upload failed, creating product without image");
                    image_error = Some(e.to_string());
                }
            }
        }

        let urls = stored.iter().map(|s| s.url.clone()).collect();
        let detail = ProductDetail::new(id, &name, &description, urls);
        if let Err(e) = self.details.insert(detail).await {
            tracing::error!(product_id = id, error = %e, "Detail insert failed, rolling back product");
            self.compensate_create(id, stored.as_ref()).await;
            return Err(e);
        }

        tracing::info!(product_id = id, "Product created");
        Ok(CreatedProduct {
            id,
            image_url: stored.map(|s| s.url),
            image_error,
        })
    }

    /// Undo a create whose document write failed. Errors are logged only.
    async fn compensate_create(&self, id: i32, stored: Option<&StoredImage>) {
        if let Err(e) = self.products.deactivate(id).await {
            tracing::error!(product_id = id, error = %e, "Failed to deactivate product during rollback");
        }
        if let Some(image) = stored {
            if let Err(e) = self.images.destroy(&image.public_id).await {
                tracing::warn!(public_id = %image.public_id, error = %e, "Failed to destroy image during rollback");
            }
        }
    }

    #[instrument(skip(self, form), fields(has_image = form.image.is_some()))]
    pub async fn update_product(&self, id: i32, form: ProductForm) -> ProductResult<UpdatedProduct> {
        let ProductForm { input, image } = form;
        let name = input.name.clone();
        let description = input.description.clone();

        if !self.products.update(id, input).await? {
            return Err(ProductError::NotFound(id));
        }

        let mut images = None;
        let mut image_url = None;
        let mut image_error = None;
        if let Some(upload) = image {
            match self.images.upload(upload).await {
                Ok(stored) => {
                    let prior = match self.details.find(id).await {
                        Ok(detail) => detail.map(|d| d.images).unwrap_or_default(),
                        Err(e) => {
                            tracing::error!(product_id = id, error = %e, "Detail read failed, discarding uploaded image");
                            if let Err(destroy_err) = self.images.destroy(&stored.public_id).await {
                                tracing::warn!(public_id = %stored.public_id, error = %destroy_err, "Failed to destroy uploaded image");
                            }
                            return Err(e);
                        }
                    };
                    self.cleanup_images(&prior).await;
                    images = Some(vec![stored.url.clone()]);
                    image_url = Some(stored.url);
                }
                Err(e) => {
                    tracing::warn!(product_id = id, error = %e, "Image upload failed, keeping previous images");
                    image_error = Some(e.to_string());
                }
            }
        }

        self.details
            .upsert(
                id,
                DetailChanges {
                    name,
                    description,
                    images,
                },
            )
            .await?;

        tracing::info!(product_id = id, "Product updated");
        Ok(UpdatedProduct {
            id,
            image_url,
            image_error,
        })
    }

    /// Remove images and document, then soft-delete the row.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if self.products.find_active(id).await?.is_none() {
            return Err(ProductError::NotFound(id));
        }

        let images = self
            .details
            .find(id)
            .await?
            .map(|d| d.images)
            .unwrap_or_default();
        self.cleanup_images(&images).await;

        self.details.delete(id).await?;
        self.products.deactivate(id).await?;

        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// Best-effort destroy of every image URL. Never fails.
    #[instrument(skip(self, urls), fields(count = urls.len()))]
    pub async fn cleanup_images(&self, urls: &[String]) -> CleanupReport {
        let mut report = CleanupReport {
            attempted: urls.len(),
            ..Default::default()
        };

        for url in urls {
            let Some(public_id) = public_id_from_url(url, self.images.folder()) else {
                tracing::warn!(%url, "Image URL has no public id, skipping");
                report.failed += 1;
                continue;
            };
            match self.images.destroy(&public_id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    tracing::warn!(%public_id, error = %e, "Failed to destroy image");
                    report.failed += 1;
                }
            }
        }

        if report.attempted > 0 {
            tracing::info!(
                attempted = report.attempted,
                deleted = report.deleted,
                failed = report.failed,
                "Image cleanup finished"
            );
        }
        report
    }

    #[instrument(skip(self))]
    pub async fn statistics(&self) -> ProductResult<Statistics> {
        let by_region = self.products.region_statistics().await?;
        let overview = self.details.overview().await?;
        Ok(Statistics::new(by_region, overview))
    }
}
