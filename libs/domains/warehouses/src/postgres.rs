//! PostgreSQL implementation of WarehouseRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{
    Alias, Condition, Expr, ExprTrait, Order, PostgresQueryBuilder, Query, SelectStatement,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, DeriveIden, EntityTrait,
    FromQueryResult, QueryFilter, Statement, TransactionTrait,
};
use tracing::instrument;

use crate::entity::{inventory, warehouse};
use crate::error::WarehouseResult;
use crate::models::{InventoryItem, NewWarehouse, UpdateWarehouse, Warehouse};
use crate::repository::WarehouseRepository;

#[derive(DeriveIden, Clone, Copy)]
enum Warehouses {
    Table,
    Id,
    BranchId,
    Name,
    Address,
    Manager,
    Capacity,
    Active,
}

#[derive(DeriveIden, Clone, Copy)]
enum Inventory {
    Table,
    Id,
    WarehouseId,
    BranchId,
    ProductId,
    Quantity,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Branches {
    Table,
    Id,
    Name,
    Region,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Unit,
}

#[derive(Clone)]
pub struct PgWarehouseRepository {
    db: DatabaseConnection,
}

impl PgWarehouseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn select_warehouses() -> SelectStatement {
        let columns = [
            Warehouses::Id,
            Warehouses::BranchId,
            Warehouses::Name,
            Warehouses::Address,
            Warehouses::Manager,
            Warehouses::Capacity,
            Warehouses::Active,
        ];

        Query::select()
            .columns(columns.map(|c| (Warehouses::Table, c)))
            .expr_as(
                Expr::col((Branches::Table, Branches::Name)),
                Alias::new("branch_name"),
            )
            .expr_as(
                Expr::col((Branches::Table, Branches::Region)),
                Alias::new("region"),
            )
            .from(Warehouses::Table)
            .left_join(
                Branches::Table,
                Expr::col((Branches::Table, Branches::Id))
                    .equals((Warehouses::Table, Warehouses::BranchId)),
            )
            .and_where(Expr::col((Warehouses::Table, Warehouses::Active)).eq(true))
            .to_owned()
    }

    /// Inventory of active warehouses with warehouse, branch and product lookups.
    /// The region filter applies to the branch the stock is recorded under.
    pub fn inventory_statement(region: Option<&str>) -> SelectStatement {
        let columns = [
            Inventory::Id,
            Inventory::WarehouseId,
            Inventory::BranchId,
            Inventory::ProductId,
            Inventory::Quantity,
            Inventory::UpdatedAt,
        ];

        let mut cond =
            Condition::all().add(Expr::col((Warehouses::Table, Warehouses::Active)).eq(true));
        if let Some(region) = region {
            cond = cond.add(Expr::col((Branches::Table, Branches::Region)).eq(region));
        }

        Query::select()
            .columns(columns.map(|c| (Inventory::Table, c)))
            .expr_as(
                Expr::col((Warehouses::Table, Warehouses::Name)),
                Alias::new("warehouse_name"),
            )
            .expr_as(
                Expr::col((Branches::Table, Branches::Name)),
                Alias::new("branch_name"),
            )
            .expr_as(
                Expr::col((Branches::Table, Branches::Region)),
                Alias::new("region"),
            )
            .expr_as(
                Expr::col((Products::Table, Products::Name)),
                Alias::new("product_name"),
            )
            .expr_as(
                Expr::col((Products::Table, Products::Unit)),
                Alias::new("unit"),
            )
            .from(Inventory::Table)
            .left_join(
                Warehouses::Table,
                Expr::col((Warehouses::Table, Warehouses::Id))
                    .equals((Inventory::Table, Inventory::WarehouseId)),
            )
            .left_join(
                Branches::Table,
                Expr::col((Branches::Table, Branches::Id))
                    .equals((Inventory::Table, Inventory::BranchId)),
            )
            .left_join(
                Products::Table,
                Expr::col((Products::Table, Products::Id))
                    .equals((Inventory::Table, Inventory::ProductId)),
            )
            .cond_where(cond)
            .order_by((Inventory::Table, Inventory::UpdatedAt), Order::Desc)
            .to_owned()
    }

    fn build(stmt: &SelectStatement) -> Statement {
        let (sql, values) = stmt.build(PostgresQueryBuilder);
        Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
    }
}

#[async_trait]
impl WarehouseRepository for PgWarehouseRepository {
    #[instrument(skip(self))]
    async fn list_warehouses(&self) -> WarehouseResult<Vec<Warehouse>> {
        let mut stmt = Self::select_warehouses();
        stmt.order_by((Warehouses::Table, Warehouses::Id), Order::Desc);
        Ok(Warehouse::find_by_statement(Self::build(&stmt))
            .all(&self.db)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_warehouse(&self, id: i32) -> WarehouseResult<Option<Warehouse>> {
        let mut stmt = Self::select_warehouses();
        stmt.and_where(Expr::col((Warehouses::Table, Warehouses::Id)).eq(id));
        Ok(Warehouse::find_by_statement(Self::build(&stmt))
            .one(&self.db)
            .await?)
    }

    #[instrument(skip(self, input), fields(warehouse_name = %input.name))]
    async fn insert_warehouse(&self, input: NewWarehouse) -> WarehouseResult<i32> {
        let model = warehouse::ActiveModel::from(input).insert(&self.db).await?;
        tracing::info!(warehouse_id = model.id, "Inserted warehouse");
        Ok(model.id)
    }

    #[instrument(skip(self, input))]
    async fn update_warehouse(&self, id: i32, input: UpdateWarehouse) -> WarehouseResult<bool> {
        let result = warehouse::Entity::update_many()
            .set(warehouse::ActiveModel::from(input))
            .filter(warehouse::Column::Id.eq(id))
            .filter(warehouse::Column::Active.eq(true))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self))]
    async fn deactivate_warehouse(&self, id: i32) -> WarehouseResult<Option<u64>> {
        let txn = self.db.begin().await?;

        let removed = inventory::Entity::delete_many()
            .filter(inventory::Column::WarehouseId.eq(id))
            .exec(&txn)
            .await?;
        let deactivated = warehouse::Entity::update_many()
            .col_expr(warehouse::Column::Active, Expr::value(false))
            .filter(warehouse::Column::Id.eq(id))
            .filter(warehouse::Column::Active.eq(true))
            .exec(&txn)
            .await?;

        if deactivated.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        txn.commit().await?;
        Ok(Some(removed.rows_affected))
    }

    #[instrument(skip(self))]
    async fn list_inventory(&self, region: Option<String>) -> WarehouseResult<Vec<InventoryItem>> {
        let stmt = Self::build(&Self::inventory_statement(region.as_deref()));
        Ok(InventoryItem::find_by_statement(stmt).all(&self.db).await?)
    }

    #[instrument(skip(self))]
    async fn update_stock(&self, id: i32, quantity: i32) -> WarehouseResult<bool> {
        let result = inventory::Entity::update_many()
            .col_expr(inventory::Column::Quantity, Expr::value(quantity))
            .col_expr(inventory::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(inventory::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{MockDatabase, MockExecResult};

    #[test]
    fn test_inventory_statement_filters_branch_region() {
        let (sql, values) =
            PgWarehouseRepository::inventory_statement(Some("Miền Trung")).build(PostgresQueryBuilder);

        assert!(sql.contains(r#""warehouses"."active" = $1"#), "{sql}");
        assert!(sql.contains(r#""branches"."region" = $2"#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "inventory"."updated_at" DESC"#), "{sql}");
        assert!(!sql.contains("Miền Trung"));
        assert_eq!(values.0.len(), 2);
    }

    #[test]
    fn test_inventory_statement_without_region() {
        let sql = PgWarehouseRepository::inventory_statement(None).to_string(PostgresQueryBuilder);
        assert!(!sql.contains(r#""branches"."region" ="#), "{sql}");
    }

    #[tokio::test]
    async fn test_deactivate_missing_warehouse_rolls_back() {
        let db = MockDatabase::new(sea_orm::DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgWarehouseRepository::new(db.clone());

        assert_eq!(repo.deactivate_warehouse(5).await.unwrap(), None);

        let log = format!("{:?}", db.into_transaction_log());
        let inventory_at = log.find(r#"DELETE FROM \"inventory\""#).unwrap();
        let warehouse_at = log.find(r#"UPDATE \"warehouses\""#).unwrap();
        assert!(inventory_at < warehouse_at, "{log}");
    }

    #[tokio::test]
    async fn test_deactivate_reports_removed_stock() {
        let db = MockDatabase::new(sea_orm::DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();
        let repo = PgWarehouseRepository::new(db);

        assert_eq!(repo.deactivate_warehouse(2).await.unwrap(), Some(3));
    }
}
