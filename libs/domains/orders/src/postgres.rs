//! PostgreSQL implementation of OrderRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use list_query::ListQuery;
use sea_orm::sea_query::{
    Alias, Condition, Expr, ExprTrait, Order, PostgresQueryBuilder, Query, SelectStatement,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DeriveIden, EntityTrait,
    FromQueryResult, QueryFilter, Statement, TransactionTrait,
};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{order, order_line};
use crate::error::OrderResult;
use crate::models::{NewOrder, OrderCustomer, OrderDetail, OrderLine, OrderSummary};
use crate::repository::OrderRepository;
use crate::sort::OrderSort;

#[derive(DeriveIden, Clone, Copy)]
pub enum Orders {
    Table,
    Id,
    CustomerId,
    BranchId,
    Region,
    OrderedAt,
    Total,
    Status,
}

#[derive(DeriveIden)]
enum OrderLines {
    Table,
    Id,
    OrderId,
    ProductId,
    Quantity,
    UnitPrice,
    LineTotal,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
}

#[derive(DeriveIden)]
enum Branches {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Unit,
}

/// Order row joined with the full customer contact, for the detail view
#[derive(Debug, FromQueryResult)]
struct OrderHeader {
    id: Uuid,
    customer_id: i32,
    region: String,
    ordered_at: DateTime<Utc>,
    total: f64,
    status: String,
    customer_name: Option<String>,
    customer_email: Option<String>,
    customer_phone: Option<String>,
    customer_address: Option<String>,
}

impl OrderHeader {
    fn with_lines(self, lines: Vec<OrderLine>) -> OrderDetail {
        OrderDetail {
            id: self.id,
            ordered_at: self.ordered_at,
            total: self.total,
            status: self.status,
            region: self.region,
            customer_id: self.customer_id,
            customer: OrderCustomer {
                name: self.customer_name,
                email: self.customer_email,
                phone: self.customer_phone,
                address: self.customer_address,
            },
            lines,
        }
    }
}

const ORDER_COLUMNS: [Orders; 7] = [
    Orders::Id,
    Orders::CustomerId,
    Orders::BranchId,
    Orders::Region,
    Orders::OrderedAt,
    Orders::Total,
    Orders::Status,
];

#[derive(Clone)]
pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The list statement for a validated query. Search covers the customer name.
    pub fn list_statement(query: &ListQuery<OrderSort>) -> SelectStatement {
        let mut stmt = Query::select()
            .columns(ORDER_COLUMNS.map(|c| (Orders::Table, c)))
            .expr_as(
                Expr::col((Customers::Table, Customers::Name)),
                Alias::new("customer_name"),
            )
            .expr_as(
                Expr::col((Customers::Table, Customers::Phone)),
                Alias::new("customer_phone"),
            )
            .expr_as(
                Expr::col((Branches::Table, Branches::Name)),
                Alias::new("branch_name"),
            )
            .from(Orders::Table)
            .left_join(
                Customers::Table,
                Expr::col((Customers::Table, Customers::Id))
                    .equals((Orders::Table, Orders::CustomerId)),
            )
            .left_join(
                Branches::Table,
                Expr::col((Branches::Table, Branches::Id))
                    .equals((Orders::Table, Orders::BranchId)),
            )
            .to_owned();

        stmt.cond_where(query.filter(
            Condition::all(),
            Some(Expr::col((Orders::Table, Orders::Region))),
            &[Expr::col((Customers::Table, Customers::Name))],
        ));
        query.order_and_limit(&mut stmt);
        stmt
    }

    fn header_statement(id: Uuid) -> SelectStatement {
        Query::select()
            .columns(ORDER_COLUMNS.map(|c| (Orders::Table, c)))
            .expr_as(
                Expr::col((Customers::Table, Customers::Name)),
                Alias::new("customer_name"),
            )
            .expr_as(
                Expr::col((Customers::Table, Customers::Email)),
                Alias::new("customer_email"),
            )
            .expr_as(
                Expr::col((Customers::Table, Customers::Phone)),
                Alias::new("customer_phone"),
            )
            .expr_as(
                Expr::col((Customers::Table, Customers::Address)),
                Alias::new("customer_address"),
            )
            .from(Orders::Table)
            .left_join(
                Customers::Table,
                Expr::col((Customers::Table, Customers::Id))
                    .equals((Orders::Table, Orders::CustomerId)),
            )
            .and_where(Expr::col((Orders::Table, Orders::Id)).eq(id))
            .to_owned()
    }

    fn lines_statement(id: Uuid) -> SelectStatement {
        Query::select()
            .expr_as(
                Expr::col((OrderLines::Table, OrderLines::ProductId)),
                Alias::new("product_id"),
            )
            .expr_as(
                Expr::col((Products::Table, Products::Name)),
                Alias::new("product_name"),
            )
            .columns([
                (OrderLines::Table, OrderLines::Quantity),
                (OrderLines::Table, OrderLines::UnitPrice),
                (OrderLines::Table, OrderLines::LineTotal),
            ])
            .expr_as(
                Expr::col((Products::Table, Products::Unit)),
                Alias::new("unit"),
            )
            .from(OrderLines::Table)
            .left_join(
                Products::Table,
                Expr::col((Products::Table, Products::Id))
                    .equals((OrderLines::Table, OrderLines::ProductId)),
            )
            .and_where(Expr::col((OrderLines::Table, OrderLines::OrderId)).eq(id))
            .order_by((OrderLines::Table, OrderLines::Id), Order::Asc)
            .to_owned()
    }

    fn build(stmt: &SelectStatement) -> Statement {
        let (sql, values) = stmt.build(PostgresQueryBuilder);
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery<OrderSort>) -> OrderResult<Vec<OrderSummary>> {
        let stmt = Self::build(&Self::list_statement(query));
        Ok(OrderSummary::find_by_statement(stmt).all(&self.db).await?)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: Uuid) -> OrderResult<Option<OrderDetail>> {
        let Some(header) = OrderHeader::find_by_statement(Self::build(&Self::header_statement(id)))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let lines = OrderLine::find_by_statement(Self::build(&Self::lines_statement(id)))
            .all(&self.db)
            .await?;
        Ok(Some(header.with_lines(lines)))
    }

    #[instrument(skip(self, input), fields(customer_id = input.customer_id, lines = input.lines.len()))]
    async fn insert(&self, input: NewOrder) -> OrderResult<Uuid> {
        let id = Uuid::new_v4();
        let txn = self.db.begin().await?;

        order::ActiveModel::new_order(id, &input)
            .insert(&txn)
            .await?;
        for line in &input.lines {
            order_line::ActiveModel::for_order(id, line)
                .insert(&txn)
                .await?;
        }

        txn.commit().await?;
        tracing::info!(order_id = %id, "Inserted order");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: String) -> OrderResult<bool> {
        let result = order::Entity::update_many()
            .col_expr(order::Column::Status, Expr::value(status))
            .filter(order::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> OrderResult<bool> {
        let txn = self.db.begin().await?;

        let lines = order_line::Entity::delete_many()
            .filter(order_line::Column::OrderId.eq(id))
            .exec(&txn)
            .await?;
        let orders = order::Entity::delete_many()
            .filter(order::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        tracing::info!(
            order_id = %id,
            lines = lines.rows_affected,
            "Deleted order"
        );
        Ok(orders.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_query::ListParams;
    use sea_orm::{MockDatabase, MockExecResult};

    #[test]
    fn test_list_statement_searches_customer_name() {
        let stmt = PgOrderRepository::list_statement(&ListQuery::from_params(&ListParams {
            search: Some("Bình".into()),
            vungmien: Some("Miền Bắc".into()),
            sort_by: Some("TongTien".into()),
            ..Default::default()
        }));
        let sql = stmt.to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"LOWER("customers"."name") LIKE '%bình%'"#), "{sql}");
        assert!(sql.contains(r#""orders"."region" = 'Miền Bắc'"#), "{sql}");
        assert!(sql.contains(r#"LEFT JOIN "branches""#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "orders"."total" DESC"#), "{sql}");
    }

    #[test]
    fn test_default_sort_is_order_date() {
        let stmt = PgOrderRepository::list_statement(&ListQuery::from_params(
            &ListParams::default(),
        ));
        let sql = stmt.to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#"ORDER BY "orders"."ordered_at" DESC"#), "{sql}");
        assert!(sql.contains("LIMIT 100"), "{sql}");
    }

    #[tokio::test]
    async fn test_delete_removes_lines_before_order() {
        let db = MockDatabase::new(sea_orm::DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let repo = PgOrderRepository::new(db.clone());

        assert!(repo.delete(Uuid::new_v4()).await.unwrap());

        let log = format!("{:?}", db.into_transaction_log());
        let lines_at = log.find(r#"DELETE FROM \"order_lines\""#).unwrap();
        let order_at = log.find(r#"DELETE FROM \"orders\""#).unwrap();
        assert!(lines_at < order_at, "{log}");
    }
}
