use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(i32),

    #[error("Inventory record not found: {0}")]
    InventoryNotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type WarehouseResult<T> = Result<T, WarehouseError>;

impl From<WarehouseError> for AppError {
    fn from(err: WarehouseError) -> Self {
        match err {
            WarehouseError::WarehouseNotFound(_) => {
                AppError::NotFound("Warehouse not found.".to_string())
            }
            WarehouseError::InventoryNotFound(_) => {
                AppError::NotFound("Inventory record not found.".to_string())
            }
            WarehouseError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for WarehouseError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
