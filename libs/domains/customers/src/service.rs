use list_query::{ListParams, ListQuery};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CustomerError, CustomerResult};
use crate::models::{Customer, NewCustomer, UpdateCustomer};
use crate::repository::CustomerRepository;

pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self, params: &ListParams) -> CustomerResult<Vec<Customer>> {
        self.repository.list(&ListQuery::from_params(params)).await
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i32) -> CustomerResult<Customer> {
        self.repository
            .find(id)
            .await?
            .ok_or(CustomerError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(customer_name = %input.name))]
    pub async fn create_customer(&self, input: NewCustomer) -> CustomerResult<i32> {
        self.repository.insert(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_customer(&self, id: i32, input: UpdateCustomer) -> CustomerResult<()> {
        if self.repository.update(id, input).await? {
            Ok(())
        } else {
            Err(CustomerError::NotFound(id))
        }
    }

    /// Hard delete, refused while any order references the customer
    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: i32) -> CustomerResult<()> {
        let orders = self.repository.count_orders(id).await?;
        if orders > 0 {
            tracing::warn!(customer_id = id, orders, "Customer has orders");
            return Err(CustomerError::HasOrders { id, orders });
        }
        if !self.repository.delete(id).await? {
            return Err(CustomerError::NotFound(id));
        }
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCustomerRepository;
    use crate::sort::CustomerSort;
    use list_query::SortDirection;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_list_resolves_query_parameters() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo
            .expect_list()
            .withf(|q| {
                q.sort == CustomerSort::Name
                    && q.direction == SortDirection::Asc
                    && q.limit == 10
                    && q.search.as_deref() == Some("An")
            })
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = CustomerService::new(mock_repo);
        let params = ListParams {
            search: Some("An".into()),
            limit: Some("10".into()),
            sort_by: Some("TenKhachHang".into()),
            sort_order: Some("asc".into()),
            ..Default::default()
        };
        assert!(service.list_customers(&params).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_with_orders_is_rejected() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo
            .expect_count_orders()
            .with(eq(3))
            .returning(|_| Ok(1));
        mock_repo.expect_delete().never();

        let service = CustomerService::new(mock_repo);
        assert!(matches!(
            service.delete_customer(3).await,
            Err(CustomerError::HasOrders { id: 3, orders: 1 })
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_customer() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo.expect_count_orders().returning(|_| Ok(0));
        mock_repo.expect_delete().with(eq(9)).returning(|_| Ok(false));

        let service = CustomerService::new(mock_repo);
        assert!(matches!(
            service.delete_customer(9).await,
            Err(CustomerError::NotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_get_missing_customer() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo.expect_find().returning(|_| Ok(None));

        let service = CustomerService::new(mock_repo);
        assert!(matches!(
            service.get_customer(1).await,
            Err(CustomerError::NotFound(1))
        ));
    }
}
