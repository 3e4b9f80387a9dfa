use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(i32),

    #[error("Customer {id} has {orders} orders")]
    HasOrders { id: i32, orders: u64 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CustomerResult<T> = Result<T, CustomerError>;

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(_) => AppError::NotFound("Customer not found.".to_string()),
            CustomerError::HasOrders { .. } => AppError::Conflict(
                "Cannot delete a customer that has orders. Delete the orders first.".to_string(),
            ),
            CustomerError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
