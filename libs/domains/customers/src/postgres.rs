//! PostgreSQL implementation of CustomerRepository

use async_trait::async_trait;
use list_query::ListQuery;
use sea_orm::sea_query::{
    Alias, Condition, Expr, ExprTrait, Func, PostgresQueryBuilder, Query, SelectStatement,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DeriveIden, EntityTrait,
    FromQueryResult, QueryFilter, Statement,
};
use tracing::instrument;

use crate::entity;
use crate::error::CustomerResult;
use crate::models::{Customer, NewCustomer, UpdateCustomer};
use crate::repository::CustomerRepository;
use crate::sort::CustomerSort;

#[derive(DeriveIden, Clone, Copy)]
pub enum Customers {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Address,
    Region,
    CustomerType,
    LoyaltyPoints,
    RegisteredAt,
    NearestBranchId,
}

#[derive(DeriveIden)]
enum Branches {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    CustomerId,
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total: i64,
}

#[derive(Clone)]
pub struct PgCustomerRepository {
    db: DatabaseConnection,
}

impl PgCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select_customers() -> SelectStatement {
        let columns = [
            Customers::Id,
            Customers::Name,
            Customers::Email,
            Customers::Phone,
            Customers::Address,
            Customers::Region,
            Customers::CustomerType,
            Customers::LoyaltyPoints,
            Customers::RegisteredAt,
            Customers::NearestBranchId,
        ];

        Query::select()
            .columns(columns.map(|c| (Customers::Table, c)))
            .expr_as(
                Expr::col((Branches::Table, Branches::Name)),
                Alias::new("branch_name"),
            )
            .from(Customers::Table)
            .left_join(
                Branches::Table,
                Expr::col((Branches::Table, Branches::Id))
                    .equals((Customers::Table, Customers::NearestBranchId)),
            )
            .to_owned()
    }

    /// The list statement for a validated query. Search covers name and phone.
    pub fn list_statement(query: &ListQuery<CustomerSort>) -> SelectStatement {
        let mut stmt = Self::select_customers();
        stmt.cond_where(query.filter(
            Condition::all(),
            Some(Expr::col((Customers::Table, Customers::Region))),
            &[
                Expr::col((Customers::Table, Customers::Name)),
                Expr::col((Customers::Table, Customers::Phone)),
            ],
        ));
        query.order_and_limit(&mut stmt);
        stmt
    }

    fn count_orders_statement(id: i32) -> SelectStatement {
        Query::select()
            .expr_as(Func::count(Expr::col(Orders::CustomerId)), Alias::new("total"))
            .from(Orders::Table)
            .and_where(Expr::col(Orders::CustomerId).eq(id))
            .to_owned()
    }

    fn build(stmt: &SelectStatement) -> Statement {
        let (sql, values) = stmt.build(PostgresQueryBuilder);
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: &ListQuery<CustomerSort>) -> CustomerResult<Vec<Customer>> {
        let stmt = Self::build(&Self::list_statement(query));
        Ok(Customer::find_by_statement(stmt).all(&self.db).await?)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: i32) -> CustomerResult<Option<Customer>> {
        let mut stmt = Self::select_customers();
        stmt.and_where(Expr::col((Customers::Table, Customers::Id)).eq(id));
        Ok(Customer::find_by_statement(Self::build(&stmt))
            .one(&self.db)
            .await?)
    }

    #[instrument(skip(self, input), fields(customer_name = %input.name))]
    async fn insert(&self, input: NewCustomer) -> CustomerResult<i32> {
        let model = entity::ActiveModel::from(input).insert(&self.db).await?;
        tracing::info!(customer_id = model.id, "Inserted customer");
        Ok(model.id)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i32, input: UpdateCustomer) -> CustomerResult<bool> {
        let result = entity::Entity::update_many()
            .set(entity::ActiveModel::from(input))
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn count_orders(&self, id: i32) -> CustomerResult<u64> {
        let row = CountRow::find_by_statement(Self::build(&Self::count_orders_statement(id)))
            .one(&self.db)
            .await?;
        Ok(row.map_or(0, |r| u64::try_from(r.total).unwrap_or(0)))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> CustomerResult<bool> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use list_query::ListParams;
    use sea_orm::{MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    #[test]
    fn test_list_statement_searches_name_and_phone() {
        let stmt = PgCustomerRepository::list_statement(&ListQuery::from_params(&ListParams {
            vungmien: Some("Miền Nam".into()),
            search: Some("0909".into()),
            ..Default::default()
        }));
        let (sql, values) = stmt.build(PostgresQueryBuilder);

        assert!(sql.contains(r#"LOWER("customers"."name") LIKE $"#), "{sql}");
        assert!(sql.contains(r#"LOWER("customers"."phone") LIKE $"#), "{sql}");
        assert!(sql.contains(r#""customers"."region" = $"#), "{sql}");
        assert!(sql.contains(r#"LEFT JOIN "branches""#), "{sql}");
        assert!(
            sql.contains(r#"ORDER BY "customers"."registered_at" DESC"#),
            "{sql}"
        );
        assert!(!sql.contains("0909"));
        assert!(values.0.contains(&Value::from("%0909%")));
    }

    #[tokio::test]
    async fn test_count_orders() {
        let db = MockDatabase::new(sea_orm::DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("total", Value::from(2i64))])]])
            .into_connection();
        let repo = PgCustomerRepository::new(db.clone());

        assert_eq!(repo.count_orders(4).await.unwrap(), 2);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(r#"FROM \"orders\""#), "{log}");
    }

    #[tokio::test]
    async fn test_delete_reports_missing_row() {
        let db = MockDatabase::new(sea_orm::DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgCustomerRepository::new(db);

        assert!(!repo.delete(99).await.unwrap());
    }
}
