use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(i32),

    #[error("Supplier not found: {0}")]
    SupplierNotFound(i32),

    #[error("Branch not found: {0}")]
    BranchNotFound(i32),

    #[error("Category {id} is used by {products} active products")]
    CategoryInUse { id: i32, products: u64 },

    #[error("Supplier {id} is used by {products} active products")]
    SupplierInUse { id: i32, products: u64 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(_) => {
                AppError::NotFound("Category not found.".to_string())
            }
            CatalogError::SupplierNotFound(_) => {
                AppError::NotFound("Supplier not found.".to_string())
            }
            CatalogError::BranchNotFound(_) => AppError::NotFound("Branch not found.".to_string()),
            CatalogError::CategoryInUse { .. } => AppError::Conflict(
                "Cannot delete a category that still has products.".to_string(),
            ),
            CatalogError::SupplierInUse { .. } => AppError::Conflict(
                "Cannot delete a supplier that still has products.".to_string(),
            ),
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
