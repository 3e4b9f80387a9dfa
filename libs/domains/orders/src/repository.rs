use async_trait::async_trait;
use chrono::Utc;
use list_query::{ListQuery, SortDirection};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{NewOrder, OrderCustomer, OrderDetail, OrderLine, OrderSummary};
use crate::sort::OrderSort;

/// Repository trait for orders and their lines
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Filtered, sorted and capped orders with customer and branch names
    async fn list(&self, query: &ListQuery<OrderSort>) -> OrderResult<Vec<OrderSummary>>;

    /// The order with its customer contact and lines
    async fn find(&self, id: Uuid) -> OrderResult<Option<OrderDetail>>;

    /// Insert the order and all its lines; returns the new order id
    async fn insert(&self, input: NewOrder) -> OrderResult<Uuid>;

    /// `false` when no order has this id
    async fn update_status(&self, id: Uuid, status: String) -> OrderResult<bool>;

    /// Delete the lines, then the order; `false` when no order has this id
    async fn delete(&self, id: Uuid) -> OrderResult<bool>;
}

#[derive(Debug, Clone)]
struct StoredOrder {
    id: Uuid,
    customer_id: i32,
    branch_id: Option<i32>,
    region: String,
    ordered_at: chrono::DateTime<Utc>,
    total: f64,
    status: String,
    lines: Vec<OrderLine>,
}

#[derive(Debug, Default)]
struct Tables {
    orders: BTreeMap<Uuid, StoredOrder>,
    customers: HashMap<i32, OrderCustomer>,
    branches: HashMap<i32, String>,
    /// Product name and unit by id, for the line join
    products: HashMap<i32, (String, String)>,
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_customer(&self, id: i32, customer: OrderCustomer) {
        self.tables.write().await.customers.insert(id, customer);
    }

    pub async fn add_branch(&self, id: i32, name: &str) {
        self.tables
            .write()
            .await
            .branches
            .insert(id, name.to_string());
    }

    pub async fn add_product(&self, id: i32, name: &str, unit: &str) {
        self.tables
            .write()
            .await
            .products
            .insert(id, (name.to_string(), unit.to_string()));
    }

    /// Number of stored lines across all orders
    pub async fn line_count(&self) -> usize {
        self.tables
            .read()
            .await
            .orders
            .values()
            .map(|o| o.lines.len())
            .sum()
    }
}

impl Tables {
    fn summary(&self, order: &StoredOrder) -> OrderSummary {
        let customer = self.customers.get(&order.customer_id);
        OrderSummary {
            id: order.id,
            customer_id: order.customer_id,
            branch_id: order.branch_id,
            region: order.region.clone(),
            ordered_at: order.ordered_at,
            total: order.total,
            status: order.status.clone(),
            customer_name: customer.and_then(|c| c.name.clone()),
            customer_phone: customer.and_then(|c| c.phone.clone()),
            branch_name: order.branch_id.and_then(|b| self.branches.get(&b).cloned()),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list(&self, query: &ListQuery<OrderSort>) -> OrderResult<Vec<OrderSummary>> {
        let tables = self.tables.read().await;
        let needle = query.search.as_ref().map(|s| s.to_lowercase());

        let mut result: Vec<OrderSummary> = tables
            .orders
            .values()
            .map(|o| tables.summary(o))
            .filter(|o| query.region.as_ref().is_none_or(|r| &o.region == r))
            .filter(|o| {
                needle.as_ref().is_none_or(|n| {
                    o.customer_name
                        .as_ref()
                        .is_some_and(|name| name.to_lowercase().contains(n.as_str()))
                })
            })
            .collect();

        result.sort_by(|a, b| {
            let ordering = match query.sort {
                OrderSort::Id => a.id.cmp(&b.id),
                OrderSort::OrderedAt => a.ordered_at.cmp(&b.ordered_at),
                OrderSort::Total => a.total.total_cmp(&b.total),
                OrderSort::Status => a.status.cmp(&b.status),
            };
            match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        result.truncate(query.limit as usize);

        Ok(result)
    }

    async fn find(&self, id: Uuid) -> OrderResult<Option<OrderDetail>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(&id).map(|order| OrderDetail {
            id: order.id,
            ordered_at: order.ordered_at,
            total: order.total,
            status: order.status.clone(),
            region: order.region.clone(),
            customer_id: order.customer_id,
            customer: tables
                .customers
                .get(&order.customer_id)
                .cloned()
                .unwrap_or_default(),
            lines: order.lines.clone(),
        }))
    }

    async fn insert(&self, input: NewOrder) -> OrderResult<Uuid> {
        let mut tables = self.tables.write().await;
        let id = Uuid::new_v4();
        let lines = input
            .lines
            .iter()
            .map(|line| {
                let product = tables.products.get(&line.product_id);
                OrderLine {
                    product_id: line.product_id,
                    product_name: product.map(|(name, _)| name.clone()),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.line_total(),
                    unit: product.map(|(_, unit)| unit.clone()),
                }
            })
            .collect();

        tables.orders.insert(
            id,
            StoredOrder {
                id,
                customer_id: input.customer_id,
                branch_id: input.branch_id,
                region: input.region.clone(),
                ordered_at: Utc::now(),
                total: input.total(),
                status: input.status_or_default(),
                lines,
            },
        );
        Ok(id)
    }

    async fn update_status(&self, id: Uuid, status: String) -> OrderResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(order) = tables.orders.get_mut(&id) else {
            return Ok(false);
        };
        order.status = status;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> OrderResult<bool> {
        Ok(self.tables.write().await.orders.remove(&id).is_some())
    }
}
