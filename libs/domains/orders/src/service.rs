use list_query::{ListParams, ListQuery};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{NewOrder, OrderDetail, OrderSummary};
use crate::repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self, params: &ListParams) -> OrderResult<Vec<OrderSummary>> {
        self.repository.list(&ListQuery::from_params(params)).await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid) -> OrderResult<OrderDetail> {
        self.repository
            .find(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// Stores the order with its lines; the total is computed from the lines
    #[instrument(skip(self, input), fields(customer_id = input.customer_id, total = input.total()))]
    pub async fn create_order(&self, input: NewOrder) -> OrderResult<Uuid> {
        self.repository.insert(input).await
    }

    #[instrument(skip(self))]
    pub async fn update_status(&self, id: Uuid, status: String) -> OrderResult<()> {
        if self.repository.update_status(id, status).await? {
            Ok(())
        } else {
            Err(OrderError::NotFound(id))
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: Uuid) -> OrderResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(OrderError::NotFound(id))
        }
    }
}
