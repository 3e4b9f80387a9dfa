use async_trait::async_trait;
use chrono::Utc;
use list_query::{ListQuery, SortDirection};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CustomerResult;
use crate::models::{
    Customer, DEFAULT_CUSTOMER_TYPE, NewCustomer, UpdateCustomer, non_blank,
};
use crate::sort::CustomerSort;

/// Repository trait for customer persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Filtered, sorted and capped customers with their nearest branch name
    async fn list(&self, query: &ListQuery<CustomerSort>) -> CustomerResult<Vec<Customer>>;

    async fn find(&self, id: i32) -> CustomerResult<Option<Customer>>;

    async fn insert(&self, input: NewCustomer) -> CustomerResult<i32>;

    /// `false` when no customer has this id
    async fn update(&self, id: i32, input: UpdateCustomer) -> CustomerResult<bool>;

    /// Number of orders placed by the customer
    async fn count_orders(&self, id: i32) -> CustomerResult<u64>;

    /// Hard delete; `false` when no customer has this id
    async fn delete(&self, id: i32) -> CustomerResult<bool>;
}

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i32, Customer>,
    /// Orders per customer id
    orders: HashMap<i32, u64>,
    /// Branch names by id, for the nearest-branch join
    branches: HashMap<i32, String>,
}

/// In-memory implementation of CustomerRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCustomerRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_branch(&self, id: i32, name: &str) {
        self.tables
            .write()
            .await
            .branches
            .insert(id, name.to_string());
    }

    /// Record an order placed by `customer_id`
    pub async fn add_order(&self, customer_id: i32) {
        *self
            .tables
            .write()
            .await
            .orders
            .entry(customer_id)
            .or_default() += 1;
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list(&self, query: &ListQuery<CustomerSort>) -> CustomerResult<Vec<Customer>> {
        let tables = self.tables.read().await;
        let needle = query.search.as_ref().map(|s| s.to_lowercase());
        let matches = |field: &Option<String>, needle: &str| {
            field
                .as_ref()
                .is_some_and(|f| f.to_lowercase().contains(needle))
        };

        let mut result: Vec<Customer> = tables
            .customers
            .values()
            .filter(|c| {
                query
                    .region
                    .as_ref()
                    .is_none_or(|r| c.region.as_ref() == Some(r))
            })
            .filter(|c| {
                needle.as_ref().is_none_or(|n| {
                    c.name.to_lowercase().contains(n.as_str()) || matches(&c.phone, n)
                })
            })
            .cloned()
            .collect();

        result.sort_by(|a, b| {
            let ordering = match query.sort {
                CustomerSort::Id => a.id.cmp(&b.id),
                CustomerSort::Name => a.name.cmp(&b.name),
                CustomerSort::LoyaltyPoints => a.loyalty_points.cmp(&b.loyalty_points),
                CustomerSort::RegisteredAt => {
                    a.registered_at.cmp(&b.registered_at).then(a.id.cmp(&b.id))
                }
            };
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        result.truncate(query.limit as usize);

        Ok(result)
    }

    async fn find(&self, id: i32) -> CustomerResult<Option<Customer>> {
        Ok(self.tables.read().await.customers.get(&id).cloned())
    }

    async fn insert(&self, input: NewCustomer) -> CustomerResult<i32> {
        let mut tables = self.tables.write().await;
        let id = tables.customers.keys().next_back().copied().unwrap_or(0) + 1;
        let branch_name = input
            .nearest_branch_id
            .and_then(|b| tables.branches.get(&b).cloned());

        tables.customers.insert(
            id,
            Customer {
                id,
                name: input.name,
                email: non_blank(input.email),
                phone: non_blank(input.phone),
                address: non_blank(input.address),
                region: non_blank(input.region),
                customer_type: non_blank(input.customer_type)
                    .unwrap_or_else(|| DEFAULT_CUSTOMER_TYPE.to_string()),
                loyalty_points: 0,
                registered_at: Utc::now(),
                nearest_branch_id: input.nearest_branch_id,
                branch_name,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i32, input: UpdateCustomer) -> CustomerResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(customer) = tables.customers.get_mut(&id) else {
            return Ok(false);
        };
        customer.name = input.name;
        customer.email = non_blank(input.email);
        customer.phone = non_blank(input.phone);
        customer.address = non_blank(input.address);
        customer.customer_type =
            non_blank(input.customer_type).unwrap_or_else(|| DEFAULT_CUSTOMER_TYPE.to_string());
        Ok(true)
    }

    async fn count_orders(&self, id: i32) -> CustomerResult<u64> {
        Ok(self
            .tables
            .read()
            .await
            .orders
            .get(&id)
            .copied()
            .unwrap_or(0))
    }

    async fn delete(&self, id: i32) -> CustomerResult<bool> {
        Ok(self.tables.write().await.customers.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_query::ListParams;

    fn customer(name: &str, phone: &str, region: &str) -> NewCustomer {
        NewCustomer {
            name: name.into(),
            phone: Some(phone.into()),
            region: Some(region.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_matches_name_or_phone() {
        let repo = InMemoryCustomerRepository::new();
        repo.insert(customer("Nguyễn Văn An", "0901111111", "Miền Nam"))
            .await
            .unwrap();
        repo.insert(customer("Lê Thị Bình", "0912222222", "Miền Bắc"))
            .await
            .unwrap();

        let by_phone = ListQuery::from_params(&ListParams {
            search: Some("0912".into()),
            ..Default::default()
        });
        let found = repo.list(&by_phone).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Lê Thị Bình");

        let by_name = ListQuery::from_params(&ListParams {
            search: Some("AN".into()),
            vungmien: Some("Miền Nam".into()),
            ..Default::default()
        });
        let found = repo.list(&by_name).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[tokio::test]
    async fn test_insert_joins_branch_name() {
        let repo = InMemoryCustomerRepository::new();
        repo.add_branch(2, "Chi nhánh Đà Nẵng").await;
        let id = repo
            .insert(NewCustomer {
                name: "Hoàng Văn Em".into(),
                nearest_branch_id: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        let stored = repo.find(id).await.unwrap().unwrap();
        assert_eq!(stored.branch_name.as_deref(), Some("Chi nhánh Đà Nẵng"));
        assert_eq!(stored.customer_type, DEFAULT_CUSTOMER_TYPE);
        assert_eq!(stored.loyalty_points, 0);
    }

    #[tokio::test]
    async fn test_order_count() {
        let repo = InMemoryCustomerRepository::new();
        repo.add_order(7).await;
        repo.add_order(7).await;
        assert_eq!(repo.count_orders(7).await.unwrap(), 2);
        assert_eq!(repo.count_orders(8).await.unwrap(), 0);
    }
}
